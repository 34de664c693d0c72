use crate::repository;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("authentication error: {0}")]
    Authentication(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidRequest(_) | Error::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Token(_) | Error::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, error) = match self {
            Error::Validation(message)
            | Error::Conflict(message)
            | Error::Authentication(message)
            | Error::Forbidden(message)
            | Error::NotFound(message) => (message.to_string(), None),
            Error::InvalidRequest(message) => (message.clone(), None),
            Error::Database(_) | Error::Token(_) | Error::Unexpected(_) => {
                // Internals are exposed only in debug builds
                let error = cfg!(debug_assertions).then(|| self.to_string());
                ("internal server error".to_string(), error)
            }
        };

        ErrorBody {
            success: false,
            message,
            error,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        match status_code.is_server_error() {
            true => tracing::error!(err = %self),
            false => tracing::warn!(err = %self),
        }

        (status_code, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}
