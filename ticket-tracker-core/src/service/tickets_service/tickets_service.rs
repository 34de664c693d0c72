use crate::{
    auth::Caller,
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;

///
/// Every operation on an existing ticket returns
/// [Error::NotFound] when the ticket does not exist
/// and [Error::Forbidden] when caller has no access to it.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsService: Send + Sync {
    ///
    /// Finds page of tickets visible to the caller
    ///
    /// ### Errors
    /// - [Error::Validation] when assignedTo or sortBy is malformed
    ///
    async fn find_tickets(
        &self,
        caller: Caller,
        filters: input::TicketFilters,
    ) -> Result<output::TicketPage, Error>;

    async fn find_ticket(&self, caller: Caller, id: ObjectId) -> Result<output::Ticket, Error>;

    ///
    /// Creates ticket owned by the caller
    ///
    /// ### Errors
    /// - [Error::Validation] when fields are invalid
    ///
    async fn create_ticket(
        &self,
        caller: Caller,
        ticket: input::TicketCreate,
    ) -> Result<output::Ticket, Error>;

    ///
    /// Updates ticket fields, stamps closing and
    /// adds the ticket to the new assignee's assigned tickets
    ///
    /// ### Errors
    /// - [Error::Validation] when fields are invalid or assignee does not exist
    ///
    async fn update_ticket(
        &self,
        caller: Caller,
        id: ObjectId,
        ticket: input::TicketUpdate,
    ) -> Result<output::Ticket, Error>;

    ///
    /// Only privileged users and the creator can delete the ticket
    ///
    async fn delete_ticket(&self, caller: Caller, id: ObjectId) -> Result<(), Error>;

    async fn add_task(
        &self,
        caller: Caller,
        id: ObjectId,
        task: input::TaskCreate,
    ) -> Result<output::Task, Error>;

    ///
    /// ### Errors
    /// - [Error::NotFound] when task does not exist
    ///
    async fn update_task(
        &self,
        caller: Caller,
        id: ObjectId,
        task_id: ObjectId,
        task: input::TaskUpdate,
    ) -> Result<output::Task, Error>;

    ///
    /// ### Errors
    /// - [Error::NotFound] when task does not exist
    ///
    async fn delete_task(&self, caller: Caller, id: ObjectId, task_id: ObjectId)
        -> Result<(), Error>;

    async fn add_comment(
        &self,
        caller: Caller,
        id: ObjectId,
        comment: input::CommentCreate,
    ) -> Result<output::Comment, Error>;
}
