use super::{
    Comment, NewTicket, Task, Ticket, TicketChanges, TicketSummary, TicketsQuery, TicketsSort,
};
use crate::{dto::input::Pagination, repository::Error};
use axum::async_trait;
use bson::oid::ObjectId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsRepository: Send + Sync {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, Error>;

    async fn find(&self, id: ObjectId) -> Result<Option<Ticket>, Error>;

    async fn find_many(
        &self,
        query: TicketsQuery,
        sort: TicketsSort,
        pagination: Pagination,
    ) -> Result<Vec<Ticket>, Error>;

    async fn count(&self, query: TicketsQuery) -> Result<u64, Error>;

    ///
    /// Finds summaries of every existing ticket among `ids`,
    /// missing tickets are skipped
    ///
    async fn find_summaries(&self, ids: Vec<ObjectId>) -> Result<Vec<TicketSummary>, Error>;

    ///
    /// Applies changes and returns updated ticket,
    /// `None` when ticket does not exist
    ///
    async fn update(&self, id: ObjectId, changes: TicketChanges) -> Result<Option<Ticket>, Error>;

    ///
    /// Returns `false` when ticket did not exist
    ///
    async fn delete(&self, id: ObjectId) -> Result<bool, Error>;

    ///
    /// Appends task to ticket's tasks
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when ticket does not exist
    ///
    async fn push_task(&self, id: ObjectId, task: Task) -> Result<(), Error>;

    ///
    /// Replaces task with the same id
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when ticket or task does not exist
    ///
    async fn update_task(&self, id: ObjectId, task: Task) -> Result<(), Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when ticket or task does not exist
    ///
    async fn pull_task(&self, id: ObjectId, task_id: ObjectId) -> Result<(), Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when ticket does not exist
    ///
    async fn push_comment(&self, id: ObjectId, comment: Comment) -> Result<(), Error>;
}
