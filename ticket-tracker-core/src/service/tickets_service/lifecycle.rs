//!
//! State rules of a ticket and its tasks.
//!
//! Functions are pure, the caller decides
//! when and how the results are persisted.
//!

use crate::{
    auth::{access_policy, Caller},
    dto::TicketStatus,
    repository::Task,
};
use bson::oid::ObjectId;
use time::OffsetDateTime;

///
/// Close stamp to store together with the status change.
///
/// Returned only when the ticket enters closed status for the first time,
/// re-closing keeps the original stamp and re-opening never clears it.
///
pub fn closing_stamp(
    stored: TicketStatus,
    closed_at: Option<OffsetDateTime>,
    incoming: Option<TicketStatus>,
    caller_id: ObjectId,
    now: OffsetDateTime,
) -> Option<(OffsetDateTime, ObjectId)> {
    if closed_at.is_some() {
        return None;
    }

    match (stored, incoming) {
        (TicketStatus::Closed, _) => None,
        (_, Some(TicketStatus::Closed)) => Some((now, caller_id)),
        _ => None,
    }
}

///
/// Applies text and completion changes to the task.
///
/// Completing stamps `completed_at` and `completed_by`,
/// uncompleting clears both, repeating the current value changes nothing.
///
pub fn apply_task_update(
    task: &mut Task,
    text: Option<String>,
    completed: Option<bool>,
    caller_id: ObjectId,
    now: OffsetDateTime,
) {
    if let Some(text) = text {
        task.text = text;
    }

    if let Some(completed) = completed {
        if task.completed != completed {
            task.completed = completed;
            match completed {
                true => {
                    task.completed_at = Some(now);
                    task.completed_by = Some(caller_id);
                }
                false => {
                    task.completed_at = None;
                    task.completed_by = None;
                }
            }
        }
    }

    task.updated_at = now;
}

///
/// User that has to receive the ticket in assigned tickets,
/// `None` when assignee is unchanged or removed
///
pub fn newly_assigned(
    previous: Option<ObjectId>,
    assigned_to: Option<Option<ObjectId>>,
) -> Option<ObjectId> {
    match assigned_to {
        Some(Some(assignee)) if previous != Some(assignee) => Some(assignee),
        _ => None,
    }
}

///
/// Restricts listing to own tickets unless caller sees everything
///
pub fn visible_to(caller: &Caller) -> Option<ObjectId> {
    match access_policy::can_see_all_tickets(caller) {
        true => None,
        false => Some(caller.id),
    }
}
