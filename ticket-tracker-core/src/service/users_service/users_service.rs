use crate::{
    auth::Caller,
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersService: Send + Sync {
    ///
    /// ### Errors
    /// - [Error::Forbidden] when caller is not admin
    ///
    async fn find_users(
        &self,
        caller: Caller,
        filters: input::UserFilters,
    ) -> Result<output::UserPage, Error>;

    ///
    /// ### Errors
    /// - [Error::Forbidden] when caller is neither admin nor the user
    /// - [Error::NotFound] when user does not exist
    ///
    async fn find_user(&self, caller: Caller, id: ObjectId) -> Result<output::User, Error>;

    ///
    /// ### Errors
    /// - [Error::Forbidden] when caller is not admin
    /// - [Error::Validation] when fields are invalid
    /// - [Error::Conflict] when email is already taken
    ///
    async fn create_user(
        &self,
        caller: Caller,
        user: input::UserCreate,
    ) -> Result<output::User, Error>;

    ///
    /// ### Errors
    /// - [Error::Forbidden] when
    ///     - caller is neither admin nor the user
    ///     - caller is not admin and tries to change role
    /// - [Error::NotFound] when user does not exist
    /// - [Error::Conflict] when email is already taken
    ///
    async fn update_user(
        &self,
        caller: Caller,
        id: ObjectId,
        user: input::UserUpdate,
    ) -> Result<output::User, Error>;

    ///
    /// ### Errors
    /// - [Error::Forbidden] when caller is not admin
    /// - [Error::Validation] when caller tries to delete own account
    /// - [Error::NotFound] when user does not exist
    ///
    async fn delete_user(&self, caller: Caller, id: ObjectId) -> Result<(), Error>;
}
