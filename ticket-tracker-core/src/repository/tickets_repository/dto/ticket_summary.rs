use super::super::entity::TicketSummaryFindEntity;
use crate::dto::{TicketPriority, TicketStatus};
use bson::oid::ObjectId;

///
/// Ticket fields shown where a ticket is referenced from a user
///
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSummary {
    pub id: ObjectId,
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
}

impl From<TicketSummaryFindEntity> for TicketSummary {
    fn from(value: TicketSummaryFindEntity) -> Self {
        Self {
            id: value._id,
            title: value.title,
            customer: value.customer,
            status: value.status,
            priority: value.priority,
        }
    }
}
