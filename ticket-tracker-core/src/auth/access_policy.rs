//!
//! Predicates deciding what the caller is allowed to do.
//!
//! Every check that depends on role or ownership goes through
//! this module so endpoints can't drift apart.
//!

use super::{Caller, Role};
use crate::repository::Ticket;
use bson::oid::ObjectId;

fn is_creator(caller: &Caller, ticket: &Ticket) -> bool {
    ticket.created_by == caller.id
}

fn is_assignee(caller: &Caller, ticket: &Ticket) -> bool {
    ticket.assigned_to == Some(caller.id)
}

pub fn can_see_all_tickets(caller: &Caller) -> bool {
    caller.role.is_privileged()
}

pub fn can_view(caller: &Caller, ticket: &Ticket) -> bool {
    can_see_all_tickets(caller) || is_creator(caller, ticket) || is_assignee(caller, ticket)
}

///
/// Reading and writing share the same rules
///
pub fn can_modify(caller: &Caller, ticket: &Ticket) -> bool {
    can_view(caller, ticket)
}

///
/// Assignee alone is not allowed to delete the ticket
///
pub fn can_delete(caller: &Caller, ticket: &Ticket) -> bool {
    can_see_all_tickets(caller) || is_creator(caller, ticket)
}

pub fn can_manage_users(caller: &Caller) -> bool {
    caller.role == Role::Admin
}

///
/// Reading and updating profile is allowed to admin and the owner
///
pub fn can_manage_user(caller: &Caller, target_id: ObjectId) -> bool {
    can_manage_users(caller) || caller.id == target_id
}

pub fn can_delete_user(caller: &Caller, target_id: ObjectId) -> bool {
    can_manage_users(caller) && caller.id != target_id
}

pub fn can_change_role(caller: &Caller) -> bool {
    can_manage_users(caller)
}
