use crate::dto::{TicketPriority, TicketStatus};
use bson::oid::ObjectId;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TicketSummaryFindEntity {
    pub _id: ObjectId,
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
}
