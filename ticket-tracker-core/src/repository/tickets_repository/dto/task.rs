use super::super::entity::TaskEntity;
use bson::{oid::ObjectId, DateTime};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: ObjectId,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
    pub completed_by: Option<ObjectId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Task {
    pub fn new(text: String, now: OffsetDateTime) -> Self {
        Self {
            id: ObjectId::new(),
            text,
            completed: false,
            completed_at: None,
            completed_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<TaskEntity> for Task {
    fn from(value: TaskEntity) -> Self {
        Self {
            id: value._id,
            text: value.text,
            completed: value.completed,
            completed_at: value.completed_at.map(OffsetDateTime::from),
            completed_by: value.completed_by,
            created_at: value.created_at.into(),
            updated_at: value.updated_at.into(),
        }
    }
}

impl From<Task> for TaskEntity {
    fn from(value: Task) -> Self {
        Self {
            _id: value.id,
            text: value.text,
            completed: value.completed,
            completed_at: value.completed_at.map(DateTime::from),
            completed_by: value.completed_by,
            created_at: value.created_at.into(),
            updated_at: value.updated_at.into(),
        }
    }
}
