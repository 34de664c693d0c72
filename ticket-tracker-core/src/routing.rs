use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::Caller,
    dto::{input, output},
    error::Error,
    extract::{JsonBody, PathParams, QueryParams},
    service::{
        auth_service::AuthService, tickets_service::TicketsService, users_service::UsersService,
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use bson::oid::ObjectId;
use std::sync::Arc;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/password", put(update_password))
        .route("/api/tickets", get(get_tickets).post(create_ticket))
        .route(
            "/api/tickets/:id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/api/tickets/:id/tasks", post(add_task))
        .route(
            "/api/tickets/:id/tasks/:task_id",
            put(update_task).delete(delete_task),
        )
        .route("/api/tickets/:id/comments", post(add_comment))
        .route("/api/users", get(get_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(application_middleware.auth.clone())
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

///
/// Malformed identifiers can't match any document,
/// so they are reported the same way as missing ones
///
fn parse_id(id: &str, not_found: &'static str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| Error::NotFound(not_found))
}

const TICKET_NOT_FOUND: &str = "ticket not found";
const TASK_NOT_FOUND: &str = "task not found";
const USER_NOT_FOUND: &str = "user not found";

async fn register(
    State(auth_service): State<Arc<dyn AuthService>>,
    JsonBody(register): JsonBody<input::Register>,
) -> Result<(StatusCode, Json<output::Success<output::AuthToken>>), Error> {
    let auth_token = auth_service.register(register).await?;

    Ok((StatusCode::CREATED, Json(output::Success::new(auth_token))))
}

async fn login(
    State(auth_service): State<Arc<dyn AuthService>>,
    JsonBody(login): JsonBody<input::Login>,
) -> Result<(StatusCode, Json<output::Success<output::AuthToken>>), Error> {
    let auth_token = auth_service.login(login).await?;

    Ok((StatusCode::OK, Json(output::Success::new(auth_token))))
}

async fn me(
    State(auth_service): State<Arc<dyn AuthService>>,
    caller: Caller,
) -> Result<(StatusCode, Json<output::Success<output::UserBody>>), Error> {
    let user = auth_service.me(caller).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::UserBody { user })),
    ))
}

async fn update_password(
    State(auth_service): State<Arc<dyn AuthService>>,
    caller: Caller,
    JsonBody(password_update): JsonBody<input::PasswordUpdate>,
) -> Result<(StatusCode, Json<output::Success<output::TokenRefreshed>>), Error> {
    let token_refreshed = auth_service
        .update_password(caller, password_update)
        .await?;

    Ok((StatusCode::OK, Json(output::Success::new(token_refreshed))))
}

async fn get_tickets(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    QueryParams(filters): QueryParams<input::TicketFilters>,
) -> Result<(StatusCode, Json<output::Success<output::TicketPage>>), Error> {
    let ticket_page = tickets_service.find_tickets(caller, filters).await?;

    Ok((StatusCode::OK, Json(output::Success::new(ticket_page))))
}

async fn create_ticket(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    JsonBody(ticket): JsonBody<input::TicketCreate>,
) -> Result<(StatusCode, Json<output::Success<output::TicketBody>>), Error> {
    let ticket = tickets_service.create_ticket(caller, ticket).await?;

    Ok((
        StatusCode::CREATED,
        Json(output::Success::new(output::TicketBody { ticket })),
    ))
}

async fn get_ticket(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
) -> Result<(StatusCode, Json<output::Success<output::TicketBody>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    let ticket = tickets_service.find_ticket(caller, id).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::TicketBody { ticket })),
    ))
}

async fn update_ticket(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
    JsonBody(ticket): JsonBody<input::TicketUpdate>,
) -> Result<(StatusCode, Json<output::Success<output::TicketBody>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    let ticket = tickets_service.update_ticket(caller, id, ticket).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::TicketBody { ticket })),
    ))
}

async fn delete_ticket(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
) -> Result<(StatusCode, Json<output::Success<output::Message>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    tickets_service.delete_ticket(caller, id).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::Message {
            message: "ticket deleted",
        })),
    ))
}

async fn add_task(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
    JsonBody(task): JsonBody<input::TaskCreate>,
) -> Result<(StatusCode, Json<output::Success<output::TaskBody>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    let task = tickets_service.add_task(caller, id, task).await?;

    Ok((
        StatusCode::CREATED,
        Json(output::Success::new(output::TaskBody { task })),
    ))
}

async fn update_task(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams((id, task_id)): PathParams<(String, String)>,
    JsonBody(task): JsonBody<input::TaskUpdate>,
) -> Result<(StatusCode, Json<output::Success<output::TaskBody>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    let task_id = parse_id(&task_id, TASK_NOT_FOUND)?;
    let task = tickets_service
        .update_task(caller, id, task_id, task)
        .await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::TaskBody { task })),
    ))
}

async fn delete_task(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams((id, task_id)): PathParams<(String, String)>,
) -> Result<(StatusCode, Json<output::Success<output::Message>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    let task_id = parse_id(&task_id, TASK_NOT_FOUND)?;
    tickets_service.delete_task(caller, id, task_id).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::Message {
            message: "task deleted",
        })),
    ))
}

async fn add_comment(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
    JsonBody(comment): JsonBody<input::CommentCreate>,
) -> Result<(StatusCode, Json<output::Success<output::CommentBody>>), Error> {
    let id = parse_id(&id, TICKET_NOT_FOUND)?;
    let comment = tickets_service.add_comment(caller, id, comment).await?;

    Ok((
        StatusCode::CREATED,
        Json(output::Success::new(output::CommentBody { comment })),
    ))
}

async fn get_users(
    State(users_service): State<Arc<dyn UsersService>>,
    caller: Caller,
    QueryParams(filters): QueryParams<input::UserFilters>,
) -> Result<(StatusCode, Json<output::Success<output::UserPage>>), Error> {
    let user_page = users_service.find_users(caller, filters).await?;

    Ok((StatusCode::OK, Json(output::Success::new(user_page))))
}

async fn create_user(
    State(users_service): State<Arc<dyn UsersService>>,
    caller: Caller,
    JsonBody(user): JsonBody<input::UserCreate>,
) -> Result<(StatusCode, Json<output::Success<output::UserBody>>), Error> {
    let user = users_service.create_user(caller, user).await?;

    Ok((
        StatusCode::CREATED,
        Json(output::Success::new(output::UserBody { user })),
    ))
}

async fn get_user(
    State(users_service): State<Arc<dyn UsersService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
) -> Result<(StatusCode, Json<output::Success<output::UserBody>>), Error> {
    let id = parse_id(&id, USER_NOT_FOUND)?;
    let user = users_service.find_user(caller, id).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::UserBody { user })),
    ))
}

async fn update_user(
    State(users_service): State<Arc<dyn UsersService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
    JsonBody(user): JsonBody<input::UserUpdate>,
) -> Result<(StatusCode, Json<output::Success<output::UserBody>>), Error> {
    let id = parse_id(&id, USER_NOT_FOUND)?;
    let user = users_service.update_user(caller, id, user).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::UserBody { user })),
    ))
}

async fn delete_user(
    State(users_service): State<Arc<dyn UsersService>>,
    caller: Caller,
    PathParams(id): PathParams<String>,
) -> Result<(StatusCode, Json<output::Success<output::Message>>), Error> {
    let id = parse_id(&id, USER_NOT_FOUND)?;
    users_service.delete_user(caller, id).await?;

    Ok((
        StatusCode::OK,
        Json(output::Success::new(output::Message {
            message: "user deleted",
        })),
    ))
}
