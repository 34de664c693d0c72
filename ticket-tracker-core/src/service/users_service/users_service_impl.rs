use super::UsersService;
use crate::{
    auth::{access_policy, Caller},
    dto::{
        input::{self, Pagination},
        output,
    },
    error::Error,
    repository::{self, NewUser, TicketsRepository, UserChanges, UsersQuery, UsersRepository},
    service::{password_hasher::PasswordHasher, references, validation},
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

const EMAIL_TAKEN: &str = "user with this email already exists";
const USER_NOT_FOUND: &str = "user not found";

pub struct UsersServiceImpl {
    users_repository: Arc<dyn UsersRepository>,
    tickets_repository: Arc<dyn TicketsRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UsersServiceImpl {
    pub fn new(
        users_repository: Arc<dyn UsersRepository>,
        tickets_repository: Arc<dyn TicketsRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users_repository,
            tickets_repository,
            password_hasher,
        }
    }

    fn map_unique_violation(err: repository::Error) -> Error {
        match err {
            repository::Error::UniqueViolation => Error::Conflict(EMAIL_TAKEN),
            err => Error::Database(err),
        }
    }

    fn validate_changes(user: input::UserUpdate) -> Result<UserChanges, Error> {
        Ok(UserChanges {
            name: user.name.as_deref().map(validation::name).transpose()?,
            email: user.email.as_deref().map(validation::email).transpose()?,
            department: user
                .department
                .as_deref()
                .map(|department| validation::department(Some(department))),
            role: user.role,
        })
    }
}

#[async_trait]
impl UsersService for UsersServiceImpl {
    async fn find_users(
        &self,
        caller: Caller,
        filters: input::UserFilters,
    ) -> Result<output::UserPage, Error> {
        tracing::info!("finding users");
        tracing::trace!(?filters);

        if !access_policy::can_manage_users(&caller) {
            return Err(Error::Forbidden("only admin can list users"));
        }

        let pagination = Pagination::new(filters.page, filters.limit);
        let query = UsersQuery {
            role: filters.role,
            search: filters.search,
        };

        let users = self
            .users_repository
            .find_many(query.clone(), pagination)
            .await?;
        let total = self.users_repository.count(query).await?;
        tracing::info!(count = users.len(), total, "found users");

        let users = references::users_output(self.tickets_repository.as_ref(), users).await?;

        Ok(output::UserPage {
            page: output::Page::new(users.len(), total, pagination),
            users,
        })
    }

    async fn find_user(&self, caller: Caller, id: ObjectId) -> Result<output::User, Error> {
        tracing::info!(%id, "finding user");

        if !access_policy::can_manage_user(&caller, id) {
            return Err(Error::Forbidden("not allowed to view this user"));
        }

        let user = self
            .users_repository
            .find(id)
            .await?
            .ok_or(Error::NotFound(USER_NOT_FOUND))?;

        references::user_output(self.tickets_repository.as_ref(), user).await
    }

    async fn create_user(
        &self,
        caller: Caller,
        user: input::UserCreate,
    ) -> Result<output::User, Error> {
        tracing::info!("creating user");
        tracing::trace!(name = %user.name, email = %user.email, role = ?user.role);

        if !access_policy::can_manage_users(&caller) {
            return Err(Error::Forbidden("only admin can create users"));
        }

        let name = validation::name(&user.name)?;
        let email = validation::email(&user.email)?;
        validation::password(&user.password)?;
        let department = validation::department(user.department.as_deref());

        let password_hash = self.password_hasher.hash(user.password).await?;
        let user = self
            .users_repository
            .insert(NewUser {
                name,
                email,
                password_hash,
                role: user.role.unwrap_or_default(),
                department,
            })
            .await
            .map_err(Self::map_unique_violation)?;
        tracing::info!(id = %user.id, "created user");

        references::user_output(self.tickets_repository.as_ref(), user).await
    }

    async fn update_user(
        &self,
        caller: Caller,
        id: ObjectId,
        user: input::UserUpdate,
    ) -> Result<output::User, Error> {
        tracing::info!(%id, "updating user");
        tracing::trace!(?user);

        if !access_policy::can_manage_user(&caller, id) {
            return Err(Error::Forbidden("not allowed to update this user"));
        }
        if user.role.is_some() && !access_policy::can_change_role(&caller) {
            return Err(Error::Forbidden("only admin can change roles"));
        }

        let changes = Self::validate_changes(user)?;

        let user = self
            .users_repository
            .update(id, changes)
            .await
            .map_err(Self::map_unique_violation)?
            .ok_or(Error::NotFound(USER_NOT_FOUND))?;
        tracing::info!("updated user");

        references::user_output(self.tickets_repository.as_ref(), user).await
    }

    async fn delete_user(&self, caller: Caller, id: ObjectId) -> Result<(), Error> {
        tracing::info!(%id, "deleting user");

        if !access_policy::can_manage_users(&caller) {
            return Err(Error::Forbidden("only admin can delete users"));
        }
        if !access_policy::can_delete_user(&caller, id) {
            return Err(Error::Validation("cannot delete own account"));
        }

        match self.users_repository.delete(id).await? {
            true => {
                tracing::info!("deleted user");
                Ok(())
            }
            false => Err(Error::NotFound(USER_NOT_FOUND)),
        }
    }
}
