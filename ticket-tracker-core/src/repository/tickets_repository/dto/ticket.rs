use super::{super::entity::TicketFindEntity, Comment, Task};
use crate::dto::{TicketPriority, TicketStatus};
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: ObjectId,
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub description: String,
    pub created_by: ObjectId,
    pub assigned_to: Option<ObjectId>,
    pub tasks: Vec<Task>,
    pub comments: Vec<Comment>,
    pub closed_at: Option<OffsetDateTime>,
    pub closed_by: Option<ObjectId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Ticket {
    pub fn task(&self, task_id: ObjectId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }
}

impl From<TicketFindEntity> for Ticket {
    fn from(value: TicketFindEntity) -> Self {
        Self {
            id: value._id,
            title: value.title,
            customer: value.customer,
            status: value.status,
            priority: value.priority,
            description: value.description,
            created_by: value.created_by,
            assigned_to: value.assigned_to,
            tasks: value.tasks.into_iter().map(Task::from).collect(),
            comments: value.comments.into_iter().map(Comment::from).collect(),
            closed_at: value.closed_at.map(OffsetDateTime::from),
            closed_by: value.closed_by,
            created_at: value.created_at.into(),
            updated_at: value.updated_at.into(),
        }
    }
}
