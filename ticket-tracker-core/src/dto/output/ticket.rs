use super::{Comment, Task, UserReference, UserReferences};
use crate::{
    dto::{TicketPriority, TicketStatus},
    repository,
};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub description: String,
    ///
    /// Referenced users are `None` when they no longer exist
    ///
    pub created_by: Option<UserReference>,
    pub assigned_to: Option<UserReference>,
    pub tasks: Vec<Task>,
    pub comments: Vec<Comment>,
    pub task_completion_percentage: u8,

    #[serde(with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
    pub closed_by: Option<UserReference>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

///
/// Rounded share of completed tasks, 0 when there are no tasks
///
fn task_completion_percentage(tasks: &[repository::Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }

    let completed = tasks.iter().filter(|task| task.completed).count();

    ((completed * 100) as f64 / tasks.len() as f64).round() as u8
}

impl Ticket {
    pub fn new(value: repository::Ticket, users: &UserReferences) -> Self {
        Self {
            id: value.id.to_hex(),
            title: value.title,
            customer: value.customer,
            status: value.status,
            priority: value.priority,
            description: value.description,
            created_by: users.get(value.created_by),
            assigned_to: value.assigned_to.and_then(|user_id| users.get(user_id)),
            task_completion_percentage: task_completion_percentage(&value.tasks),
            tasks: value
                .tasks
                .into_iter()
                .map(|task| Task::new(task, users))
                .collect(),
            comments: value
                .comments
                .into_iter()
                .map(|comment| Comment::new(comment, users))
                .collect(),
            closed_at: value.closed_at,
            closed_by: value.closed_by.and_then(|user_id| users.get(user_id)),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketBody {
    pub ticket: Ticket,
}
