//!
//! Issuing and validating JWTs used by the ticket tracker.
//!
//! Tokens are HS256 signed and carry the user identifier in `sub`.
//! [JwtAuthLayer] validates the `Authorization: Bearer <token>` header
//! and inserts [AuthenticatedUser] into request extensions.
//!

pub mod dto;
pub mod error;
pub mod middleware;

mod jwt_encoder;

pub use dto::{AuthenticatedUser, Claims};
pub use jwt_encoder::JwtEncoder;
pub use middleware::JwtAuthLayer;
