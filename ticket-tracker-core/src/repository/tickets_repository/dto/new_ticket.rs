use super::Task;
use crate::dto::{TicketPriority, TicketStatus};
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub description: String,
    pub created_by: ObjectId,
    pub tasks: Vec<Task>,
    pub closed_at: Option<OffsetDateTime>,
    pub closed_by: Option<ObjectId>,
    pub created_at: OffsetDateTime,
}
