mod ticket_priority;
mod ticket_status;

pub use ticket_priority::*;
pub use ticket_status::*;
