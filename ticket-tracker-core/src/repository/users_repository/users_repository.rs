use super::{NewUser, User, UserChanges, UserSummary, UsersQuery};
use crate::{dto::input::Pagination, repository::Error};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    ///
    /// Inserts new user
    ///
    /// ### Errors
    /// - [Error::UniqueViolation] when email is already taken
    ///
    async fn insert(&self, user: NewUser) -> Result<User, Error>;

    async fn find(&self, id: ObjectId) -> Result<Option<User>, Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    ///
    /// Finds name and email of every existing user among `ids`,
    /// missing users are skipped
    ///
    async fn find_summaries(&self, ids: Vec<ObjectId>) -> Result<Vec<UserSummary>, Error>;

    ///
    /// Finds users page ordered from the newest
    ///
    async fn find_many(
        &self,
        query: UsersQuery,
        pagination: Pagination,
    ) -> Result<Vec<User>, Error>;

    async fn count(&self, query: UsersQuery) -> Result<u64, Error>;

    ///
    /// Applies changes and returns updated user,
    /// `None` when user does not exist
    ///
    /// ### Errors
    /// - [Error::UniqueViolation] when changed email is already taken
    ///
    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>, Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when user does not exist
    ///
    async fn update_password(&self, id: ObjectId, password_hash: String) -> Result<(), Error>;

    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when user does not exist
    ///
    async fn update_last_login(&self, id: ObjectId, last_login: OffsetDateTime)
        -> Result<(), Error>;

    ///
    /// Returns `false` when user did not exist
    ///
    async fn delete(&self, id: ObjectId) -> Result<bool, Error>;

    ///
    /// Adds ticket to user's assigned tickets, keeps them a set
    ///
    async fn add_assigned_ticket(&self, user_id: ObjectId, ticket_id: ObjectId)
        -> Result<(), Error>;

    async fn remove_assigned_ticket(
        &self,
        user_id: ObjectId,
        ticket_id: ObjectId,
    ) -> Result<(), Error>;
}
