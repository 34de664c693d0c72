mod bcrypt_password_hasher;
mod password_hasher;

pub use bcrypt_password_hasher::*;
pub use password_hasher::*;
