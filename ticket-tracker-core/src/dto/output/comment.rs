use super::{UserReference, UserReferences};
use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    ///
    /// `None` when the author no longer exists
    ///
    pub user: Option<UserReference>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Comment {
    pub fn new(value: repository::Comment, users: &UserReferences) -> Self {
        Self {
            id: value.id.to_hex(),
            text: value.text,
            user: users.get(value.user),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub comment: Comment,
}
