use super::PasswordHasher;
use crate::error::Error;
use anyhow::Context;
use axum::async_trait;

///
/// Hashes passwords with bcrypt on the blocking thread pool
///
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: String) -> Result<String, Error> {
        let cost = self.cost;

        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("password hashing task failed")?
            .context("failed to hash password")?;

        Ok(hash)
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool, Error> {
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("password verification task failed")?
            .context("failed to verify password")?;

        Ok(matches)
    }
}
