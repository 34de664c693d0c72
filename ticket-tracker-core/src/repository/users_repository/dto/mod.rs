mod new_user;
mod user;
mod user_changes;
mod user_summary;
mod users_query;

pub use new_user::*;
pub use user::*;
pub use user_changes::*;
pub use user_summary::*;
pub use users_query::*;
