use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct CommentEntity {
    pub _id: ObjectId,
    pub text: String,
    pub user: ObjectId,
    pub created_at: DateTime,
}
