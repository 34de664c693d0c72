//!
//! Resolution of ids stored in documents into the names shown in responses.
//!
//! Every response loads its references with at most one query per collection.
//!

use crate::{
    dto::output,
    error::Error,
    repository::{Ticket, TicketsRepository, User, UsersRepository},
};
use bson::oid::ObjectId;
use std::collections::BTreeSet;

///
/// Users a ticket points to, including task completers and comment authors
///
pub fn ticket_user_ids(ticket: &Ticket) -> impl Iterator<Item = ObjectId> + '_ {
    std::iter::once(ticket.created_by)
        .chain(ticket.assigned_to)
        .chain(ticket.closed_by)
        .chain(ticket.tasks.iter().filter_map(|task| task.completed_by))
        .chain(ticket.comments.iter().map(|comment| comment.user))
}

pub fn assigned_ticket_ids(user: &User) -> impl Iterator<Item = ObjectId> + '_ {
    user.assigned_tickets.iter().copied()
}

pub async fn user_references(
    users_repository: &dyn UsersRepository,
    ids: BTreeSet<ObjectId>,
) -> Result<output::UserReferences, Error> {
    if ids.is_empty() {
        return Ok(output::UserReferences::default());
    }

    let summaries = users_repository
        .find_summaries(ids.into_iter().collect())
        .await?;

    Ok(summaries.into_iter().collect())
}

pub async fn ticket_references(
    tickets_repository: &dyn TicketsRepository,
    ids: BTreeSet<ObjectId>,
) -> Result<output::TicketReferences, Error> {
    if ids.is_empty() {
        return Ok(output::TicketReferences::default());
    }

    let summaries = tickets_repository
        .find_summaries(ids.into_iter().collect())
        .await?;

    Ok(summaries.into_iter().collect())
}

///
/// Renders users with their assigned tickets loaded in one query
///
pub async fn users_output(
    tickets_repository: &dyn TicketsRepository,
    users: Vec<User>,
) -> Result<Vec<output::User>, Error> {
    let ids = users.iter().flat_map(assigned_ticket_ids).collect();
    let tickets = ticket_references(tickets_repository, ids).await?;

    Ok(users
        .into_iter()
        .map(|user| output::User::new(user, &tickets))
        .collect())
}

pub async fn user_output(
    tickets_repository: &dyn TicketsRepository,
    user: User,
) -> Result<output::User, Error> {
    let tickets = ticket_references(tickets_repository, assigned_ticket_ids(&user).collect()).await?;

    Ok(output::User::new(user, &tickets))
}

///
/// Renders tickets with all referenced users loaded in one query
///
pub async fn tickets_output(
    users_repository: &dyn UsersRepository,
    tickets: Vec<Ticket>,
) -> Result<Vec<output::Ticket>, Error> {
    let ids = tickets.iter().flat_map(ticket_user_ids).collect();
    let users = user_references(users_repository, ids).await?;

    Ok(tickets
        .into_iter()
        .map(|ticket| output::Ticket::new(ticket, &users))
        .collect())
}

pub async fn ticket_output(
    users_repository: &dyn UsersRepository,
    ticket: Ticket,
) -> Result<output::Ticket, Error> {
    let users = user_references(users_repository, ticket_user_ids(&ticket).collect()).await?;

    Ok(output::Ticket::new(ticket, &users))
}
