use jsonwebtoken::errors::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("illegal character in Authorization header")]
    IllegalCharacter,

    #[error("unsupported authorization type")]
    UnsupportedType,

    #[error("token expired")]
    Expired,

    #[error("invalid jwt: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

impl AuthError {
    ///
    /// Message that is safe to return to the client.
    ///
    /// Expired tokens are reported separately so clients
    /// know they have to log in again.
    ///
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingHeader | AuthError::IllegalCharacter | AuthError::UnsupportedType => {
                "no token, access denied"
            }
            AuthError::Expired => "token expired, please log in again",
            AuthError::Invalid(_) => "invalid token",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid(err),
        }
    }
}
