use super::User;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct TokenRefreshed {
    pub message: &'static str,
    pub token: String,
}
