use super::super::entity::UserSummaryFindEntity;
use bson::oid::ObjectId;

#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
}

impl From<UserSummaryFindEntity> for UserSummary {
    fn from(value: UserSummaryFindEntity) -> Self {
        Self {
            id: value._id,
            name: value.name,
            email: value.email,
        }
    }
}
