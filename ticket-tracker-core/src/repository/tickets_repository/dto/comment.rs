use super::super::entity::CommentEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: ObjectId,
    pub text: String,

    ///
    /// author
    ///
    pub user: ObjectId,
    pub created_at: OffsetDateTime,
}

impl From<CommentEntity> for Comment {
    fn from(value: CommentEntity) -> Self {
        Self {
            id: value._id,
            text: value.text,
            user: value.user,
            created_at: value.created_at.into(),
        }
    }
}

impl From<Comment> for CommentEntity {
    fn from(value: Comment) -> Self {
        Self {
            _id: value.id,
            text: value.text,
            user: value.user,
            created_at: value.created_at.into(),
        }
    }
}
