mod auth;
mod comment;
mod pagination;
mod task;
mod ticket;
mod ticket_filters;
mod user;
mod user_filters;

pub use auth::*;
pub use comment::*;
pub use pagination::*;
pub use task::*;
pub use ticket::*;
pub use ticket_filters::*;
pub use user::*;
pub use user_filters::*;

use serde::{Deserialize, Deserializer};

///
/// Distinguishes a field set to null from a missing field.
///
/// Use with `#[serde(default)]` so missing field becomes `None`
/// and explicit null becomes `Some(None)`.
///
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
