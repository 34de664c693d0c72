mod comment_entity;
mod task_entity;
mod ticket_find_entity;
mod ticket_insert_entity;
mod ticket_summary_find_entity;

pub use comment_entity::*;
pub use task_entity::*;
pub use ticket_find_entity::*;
pub use ticket_insert_entity::*;
pub use ticket_summary_find_entity::*;
