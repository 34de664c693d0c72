use super::{deserialize_some, TaskCreate};
use crate::dto::{TicketPriority, TicketStatus};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TicketCreate {
    pub title: String,
    pub customer: String,
    pub description: String,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    #[serde(default)]
    pub tasks: Vec<TaskCreate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,

    ///
    /// - `None` assignee stays unchanged
    /// - `Some(None)` ticket becomes unassigned
    /// - `Some(Some(id))` ticket is assigned to user with id
    ///
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to: Option<Option<String>>,
}
