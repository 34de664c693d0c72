use super::super::entity::UserFindEntity;
use crate::auth::Role;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    pub assigned_tickets: Vec<ObjectId>,
    pub last_login: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<UserFindEntity> for User {
    fn from(value: UserFindEntity) -> Self {
        Self {
            id: value._id,
            name: value.name,
            email: value.email,
            password_hash: value.password_hash,
            role: value.role,
            department: value.department,
            assigned_tickets: value.assigned_tickets,
            last_login: value.last_login.map(OffsetDateTime::from),
            created_at: value.created_at.into(),
            updated_at: value.updated_at.into(),
        }
    }
}
