use super::{CommentEntity, TaskEntity};
use crate::dto::{TicketPriority, TicketStatus};
use bson::{oid::ObjectId, DateTime};
use serde::Serialize;

#[derive(Serialize)]
pub struct TicketInsertEntity<'a> {
    pub title: &'a str,
    pub customer: &'a str,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub description: &'a str,
    pub created_by: ObjectId,
    pub tasks: Vec<TaskEntity>,
    pub comments: Vec<CommentEntity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<ObjectId>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}
