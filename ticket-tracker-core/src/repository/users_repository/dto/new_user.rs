use crate::auth::Role;

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,

    ///
    /// expected to be lowercased already
    ///
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
}
