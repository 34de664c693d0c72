use super::AuthService;
use crate::{
    auth::{Caller, Role},
    dto::{input, output},
    error::Error,
    repository::{self, NewUser, TicketsRepository, User, UserChanges, UsersRepository},
    service::{password_hasher::PasswordHasher, references, validation},
};
use axum::async_trait;
use bson::oid::ObjectId;
use jwt_auth::JwtEncoder;
use std::sync::Arc;
use time::OffsetDateTime;

const INVALID_CREDENTIALS: &str = "invalid credentials";
const EMAIL_TAKEN: &str = "user with this email already exists";

pub struct AuthServiceImpl {
    users_repository: Arc<dyn UsersRepository>,
    tickets_repository: Arc<dyn TicketsRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    jwt_encoder: JwtEncoder,
}

impl AuthServiceImpl {
    pub fn new(
        users_repository: Arc<dyn UsersRepository>,
        tickets_repository: Arc<dyn TicketsRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        jwt_encoder: JwtEncoder,
    ) -> Self {
        Self {
            users_repository,
            tickets_repository,
            password_hasher,
            jwt_encoder,
        }
    }

    async fn auth_token(&self, user: User) -> Result<output::AuthToken, Error> {
        let token = self.jwt_encoder.encode(&user.id.to_hex())?;
        let user = references::user_output(self.tickets_repository.as_ref(), user).await?;

        Ok(output::AuthToken { token, user })
    }

    async fn find_user(&self, id: ObjectId) -> Result<User, Error> {
        self.users_repository
            .find(id)
            .await?
            .ok_or(Error::NotFound("user not found"))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, register: input::Register) -> Result<output::AuthToken, Error> {
        tracing::info!("registering user");
        tracing::trace!(name = %register.name, email = %register.email);

        let name = validation::name(&register.name)?;
        let email = validation::email(&register.email)?;
        validation::password(&register.password)?;
        let department = validation::department(register.department.as_deref());

        if self.users_repository.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(EMAIL_TAKEN));
        }

        let password_hash = self.password_hasher.hash(register.password).await?;
        let user = self
            .users_repository
            .insert(NewUser {
                name,
                email,
                password_hash,
                role: Role::User,
                department,
            })
            .await
            .map_err(|err| match err {
                repository::Error::UniqueViolation => Error::Conflict(EMAIL_TAKEN),
                err => Error::Database(err),
            })?;
        tracing::info!(id = %user.id, "registered user");

        self.auth_token(user).await
    }

    async fn login(&self, login: input::Login) -> Result<output::AuthToken, Error> {
        tracing::info!("logging in");

        let email = login.email.trim().to_lowercase();
        let Some(mut user) = self.users_repository.find_by_email(&email).await? else {
            tracing::info!("user not exist");
            return Err(Error::Authentication(INVALID_CREDENTIALS));
        };

        let password_matches = self
            .password_hasher
            .verify(login.password, user.password_hash.clone())
            .await?;
        if !password_matches {
            tracing::info!(id = %user.id, "password does not match");
            return Err(Error::Authentication(INVALID_CREDENTIALS));
        }

        let now = OffsetDateTime::now_utc();
        self.users_repository
            .update_last_login(user.id, now)
            .await?;
        user.last_login = Some(now);
        tracing::info!(id = %user.id, "logged in");

        self.auth_token(user).await
    }

    async fn find_caller(&self, id: ObjectId) -> Result<Caller, Error> {
        let user = self.find_user(id).await?;

        Ok(Caller {
            id: user.id,
            role: user.role,
        })
    }

    async fn me(&self, caller: Caller) -> Result<output::User, Error> {
        tracing::info!("finding current user");

        let user = self.find_user(caller.id).await?;

        references::user_output(self.tickets_repository.as_ref(), user).await
    }

    async fn update_password(
        &self,
        caller: Caller,
        password_update: input::PasswordUpdate,
    ) -> Result<output::TokenRefreshed, Error> {
        tracing::info!("updating password");

        let user = self.find_user(caller.id).await?;

        let password_matches = self
            .password_hasher
            .verify(password_update.current_password, user.password_hash)
            .await?;
        if !password_matches {
            return Err(Error::Authentication("current password is incorrect"));
        }

        validation::password(&password_update.new_password)?;

        let password_hash = self
            .password_hasher
            .hash(password_update.new_password)
            .await?;
        self.users_repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::NotFound("user not found"),
                err => Error::Database(err),
            })?;
        tracing::info!("updated password");

        let token = self.jwt_encoder.encode(&user.id.to_hex())?;

        Ok(output::TokenRefreshed {
            message: "password updated",
            token,
        })
    }

    async fn ensure_admin(&self, email: String, password: String) -> Result<(), Error> {
        let email = validation::email(&email)?;

        match self.users_repository.find_by_email(&email).await? {
            Some(user) if user.role == Role::Admin => {
                tracing::info!(id = %user.id, "admin account exists");
            }
            Some(user) => {
                self.users_repository
                    .update(
                        user.id,
                        UserChanges {
                            role: Some(Role::Admin),
                            ..Default::default()
                        },
                    )
                    .await?;
                tracing::info!(id = %user.id, "promoted account to admin");
            }
            None => {
                validation::password(&password)?;
                let password_hash = self.password_hasher.hash(password).await?;
                let user = self
                    .users_repository
                    .insert(NewUser {
                        name: "Administrator".to_string(),
                        email,
                        password_hash,
                        role: Role::Admin,
                        department: validation::DEFAULT_DEPARTMENT.to_string(),
                    })
                    .await?;
                tracing::info!(id = %user.id, "created admin account");
            }
        }

        Ok(())
    }
}
