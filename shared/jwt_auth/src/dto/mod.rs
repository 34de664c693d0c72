mod authenticated_user;
mod claims;

pub use authenticated_user::*;
pub use claims::*;
