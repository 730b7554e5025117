use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound(Uuid),
    #[error("Assignment not found")]
    AssignmentNotFound(Uuid),
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("{0}")]
    Upstream(String),
    #[error("Failed to process document")]
    DocumentProcessing(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Internal(format!("database error: {}", err))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotAuthenticated
            | DomainError::InvalidToken
            | DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::UserNotFound(_) | DomainError::AssignmentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DomainError::UserAlreadyExists => StatusCode::CONFLICT,
            DomainError::Upstream(_)
            | DomainError::DocumentProcessing(_)
            | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // database and library details stay in the logs
            DomainError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let details = match self {
            DomainError::DocumentProcessing(detail) => Some(detail.as_str()),
            _ => None,
        };
        let body = ErrorBody {
            message: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
