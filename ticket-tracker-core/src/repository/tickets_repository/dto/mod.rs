mod comment;
mod new_ticket;
mod task;
mod ticket;
mod ticket_changes;
mod ticket_summary;
mod tickets_query;
mod tickets_sort;

pub use comment::*;
pub use new_ticket::*;
pub use task::*;
pub use ticket::*;
pub use ticket_changes::*;
pub use ticket_summary::*;
pub use tickets_query::*;
pub use tickets_sort::*;
