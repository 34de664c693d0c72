use super::{CommentEntity, TaskEntity};
use crate::dto::{TicketPriority, TicketStatus};
use bson::{oid::ObjectId, DateTime};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TicketFindEntity {
    pub _id: ObjectId,
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub description: String,
    pub created_by: ObjectId,
    pub assigned_to: Option<ObjectId>,

    #[serde(default)]
    pub tasks: Vec<TaskEntity>,

    #[serde(default)]
    pub comments: Vec<CommentEntity>,

    pub closed_at: Option<DateTime>,
    pub closed_by: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
