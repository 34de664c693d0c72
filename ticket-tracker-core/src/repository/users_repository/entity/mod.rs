mod user_find_entity;
mod user_insert_entity;
mod user_summary_find_entity;

pub use user_find_entity::*;
pub use user_insert_entity::*;
pub use user_summary_find_entity::*;
