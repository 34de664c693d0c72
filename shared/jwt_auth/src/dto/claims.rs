use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the user the token was issued for
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}
