use crate::auth::Role;
use bson::{oid::ObjectId, DateTime};
use serde::Serialize;

#[derive(Serialize)]
pub struct UserInsertEntity<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub department: &'a str,
    pub assigned_tickets: Vec<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
