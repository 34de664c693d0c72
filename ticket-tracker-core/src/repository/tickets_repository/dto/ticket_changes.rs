use crate::dto::{TicketPriority, TicketStatus};
use bson::oid::ObjectId;
use time::OffsetDateTime;

///
/// Partial ticket update applied in a single write
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,

    ///
    /// `Some(None)` removes the assignee
    ///
    pub assigned_to: Option<Option<ObjectId>>,

    ///
    /// Close stamp `(closed_at, closed_by)`
    ///
    pub closed: Option<(OffsetDateTime, ObjectId)>,
}
