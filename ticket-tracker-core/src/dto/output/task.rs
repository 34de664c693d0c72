use super::{UserReference, UserReferences};
use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,

    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<OffsetDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<UserReference>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Task {
    pub fn new(value: repository::Task, users: &UserReferences) -> Self {
        Self {
            id: value.id.to_hex(),
            text: value.text,
            completed: value.completed,
            completed_at: value.completed_at,
            completed_by: value.completed_by.and_then(|user_id| users.get(user_id)),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskBody {
    pub task: Task,
}
