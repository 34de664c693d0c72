use crate::error::Error;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: String) -> Result<String, Error>;

    ///
    /// ### Returns
    /// `true` when password matches the hash
    ///
    async fn verify(&self, password: String, hash: String) -> Result<bool, Error>;
}
