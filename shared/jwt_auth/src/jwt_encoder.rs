use crate::dto::Claims;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use std::{sync::Arc, time::Duration};

///
/// Signs tokens for authenticated users.
///
/// Cloning is cheap, key is shared behind an Arc.
///
#[derive(Clone)]
pub struct JwtEncoder {
    inner: Arc<JwtEncoderInner>,
}

struct JwtEncoderInner {
    key: EncodingKey,
    header: Header,
    ttl: Duration,
}

impl JwtEncoder {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let inner = JwtEncoderInner {
            key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            ttl,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    ///
    /// Creates token for the subject valid for configured ttl
    ///
    pub fn encode(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat + self.inner.ttl.as_secs(),
        };

        jsonwebtoken::encode(&self.inner.header, &claims, &self.inner.key)
    }
}
