use crate::dto::{TicketPriority, TicketStatus};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,

    ///
    /// `field` or `field:asc` or `field:desc`
    ///
    pub sort_by: Option<String>,
}
