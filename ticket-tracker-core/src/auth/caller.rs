use super::Role;
use crate::{error::Error, service::auth_service::AuthService};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use bson::oid::ObjectId;
use jwt_auth::AuthenticatedUser;
use std::sync::Arc;

///
/// User on whose behalf the request is processed.
///
/// Extracting requires [jwt_auth::JwtAuthLayer] to run first,
/// the user is loaded from the database on every request
/// so role changes and deleted accounts take effect immediately.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub id: ObjectId,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    Arc<dyn AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(Error::Authentication("no token, access denied"))?;
        let id = ObjectId::parse_str(&user.id).map_err(|_| Error::Authentication("invalid token"))?;

        let auth_service = Arc::<dyn AuthService>::from_ref(state);

        auth_service.find_caller(id).await
    }
}
