use crate::dto::{TicketPriority, TicketStatus};
use bson::oid::ObjectId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketsQuery {
    ///
    /// When set, only tickets created by or assigned to this user match
    ///
    pub visible_to: Option<ObjectId>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to: Option<ObjectId>,

    ///
    /// Full text search over title, description and customer
    ///
    pub search: Option<String>,
}
