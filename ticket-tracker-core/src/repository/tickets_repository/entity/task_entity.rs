use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct TaskEntity {
    pub _id: ObjectId,
    pub text: String,
    pub completed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<ObjectId>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}
