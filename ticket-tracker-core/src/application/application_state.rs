use super::ApplicationEnv;
use crate::{
    repository::{TicketsRepositoryImpl, UsersRepositoryImpl},
    service::{
        auth_service::{AuthService, AuthServiceImpl},
        password_hasher::BcryptPasswordHasher,
        tickets_service::{TicketsService, TicketsServiceImpl},
        users_service::{UsersService, UsersServiceImpl},
    },
};
use axum::extract::FromRef;
use jwt_auth::JwtEncoder;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub auth_service: Arc<dyn AuthService>,
    pub users_service: Arc<dyn UsersService>,
    pub tickets_service: Arc<dyn TicketsService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let users_repository = UsersRepositoryImpl::new(db.clone()).await?;
    let users_repository = Arc::new(users_repository);

    let tickets_repository = TicketsRepositoryImpl::new(db).await?;
    let tickets_repository = Arc::new(tickets_repository);

    tracing::info!("creating services");
    let password_hasher = BcryptPasswordHasher::new(env.bcrypt_cost);
    let password_hasher = Arc::new(password_hasher);

    let jwt_encoder = JwtEncoder::new(env.jwt_secret.as_bytes(), env.jwt_ttl);
    let auth_service = AuthServiceImpl::new(
        users_repository.clone(),
        tickets_repository.clone(),
        password_hasher.clone(),
        jwt_encoder,
    );
    let auth_service = Arc::new(auth_service);

    let users_service = UsersServiceImpl::new(
        users_repository.clone(),
        tickets_repository.clone(),
        password_hasher,
    );
    let users_service = Arc::new(users_service);

    let tickets_service = TicketsServiceImpl::new(tickets_repository, users_repository);
    let tickets_service = Arc::new(tickets_service);

    if let (Some(email), Some(password)) = (&env.admin_email, &env.admin_password) {
        tracing::info!("ensuring admin account exists");
        auth_service
            .ensure_admin(email.clone(), password.clone())
            .await?;
    }

    Ok((
        ApplicationState {
            auth_service,
            users_service,
            tickets_service,
        },
        ApplicationStateToClose { db_client },
    ))
}
