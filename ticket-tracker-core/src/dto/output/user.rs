use super::{TicketReference, TicketReferences};
use crate::{auth::Role, repository};
use serde::Serialize;
use time::OffsetDateTime;

///
/// Public view of the user, never contains password hash
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    ///
    /// Tickets that no longer exist are left out
    ///
    pub assigned_tickets: Vec<TicketReference>,

    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn new(value: repository::User, tickets: &TicketReferences) -> Self {
        Self {
            id: value.id.to_hex(),
            name: value.name,
            email: value.email,
            role: value.role,
            department: value.department,
            assigned_tickets: value
                .assigned_tickets
                .iter()
                .filter_map(|ticket_id| tickets.get(*ticket_id))
                .collect(),
            last_login: value.last_login,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: User,
}
