use crate::{
    auth::Caller,
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    ///
    /// Creates account with role user
    ///
    /// ### Errors
    /// - [Error::Validation] when name, email or password is invalid
    /// - [Error::Conflict] when email is already taken
    ///
    async fn register(&self, register: input::Register) -> Result<output::AuthToken, Error>;

    ///
    /// ### Errors
    /// - [Error::Authentication] when user does not exist or password does not match,
    /// both cases are reported identically
    ///
    async fn login(&self, login: input::Login) -> Result<output::AuthToken, Error>;

    ///
    /// Loads user on whose behalf the request is processed
    ///
    /// ### Errors
    /// - [Error::NotFound] when user no longer exists
    ///
    async fn find_caller(&self, id: ObjectId) -> Result<Caller, Error>;

    async fn me(&self, caller: Caller) -> Result<output::User, Error>;

    ///
    /// Replaces password and issues new token
    ///
    /// ### Errors
    /// - [Error::Authentication] when current password does not match
    /// - [Error::Validation] when new password is too short
    ///
    async fn update_password(
        &self,
        caller: Caller,
        password_update: input::PasswordUpdate,
    ) -> Result<output::TokenRefreshed, Error>;

    ///
    /// Makes sure admin account with email exists.
    /// Existing account is promoted to admin, its password is left untouched.
    ///
    async fn ensure_admin(&self, email: String, password: String) -> Result<(), Error>;
}
