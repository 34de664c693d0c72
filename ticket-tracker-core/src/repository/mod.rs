mod error;
mod tickets_repository;
mod users_repository;

pub use error::*;
pub use tickets_repository::*;
pub use users_repository::*;
