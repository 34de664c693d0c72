use crate::auth::Role;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersQuery {
    pub role: Option<Role>,

    ///
    /// Case-insensitive substring of name, email or department
    ///
    pub search: Option<String>,
}
