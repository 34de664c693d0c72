mod auth;
mod comment;
mod page;
mod reference;
mod success;
mod task;
mod ticket;
mod user;

pub use auth::*;
pub use comment::*;
pub use page::*;
pub use reference::*;
pub use success::*;
pub use task::*;
pub use ticket::*;
pub use user::*;
