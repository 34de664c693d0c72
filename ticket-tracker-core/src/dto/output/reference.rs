use crate::{
    dto::{TicketPriority, TicketStatus},
    repository,
};
use bson::oid::ObjectId;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReference {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<repository::UserSummary> for UserReference {
    fn from(value: repository::UserSummary) -> Self {
        Self {
            id: value.id.to_hex(),
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketReference {
    pub id: String,
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
}

impl From<repository::TicketSummary> for TicketReference {
    fn from(value: repository::TicketSummary) -> Self {
        Self {
            id: value.id.to_hex(),
            title: value.title,
            customer: value.customer,
            status: value.status,
            priority: value.priority,
        }
    }
}

///
/// Users loaded for a single response, keyed by id.
///
/// An id without entry belongs to a user that no longer exists.
///
#[derive(Debug, Default)]
pub struct UserReferences(HashMap<ObjectId, UserReference>);

impl UserReferences {
    pub fn get(&self, id: ObjectId) -> Option<UserReference> {
        self.0.get(&id).cloned()
    }
}

impl FromIterator<repository::UserSummary> for UserReferences {
    fn from_iter<T: IntoIterator<Item = repository::UserSummary>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|summary| (summary.id, summary.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Default)]
pub struct TicketReferences(HashMap<ObjectId, TicketReference>);

impl TicketReferences {
    pub fn get(&self, id: ObjectId) -> Option<TicketReference> {
        self.0.get(&id).cloned()
    }
}

impl FromIterator<repository::TicketSummary> for TicketReferences {
    fn from_iter<T: IntoIterator<Item = repository::TicketSummary>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|summary| (summary.id, summary.into()))
                .collect(),
        )
    }
}
