use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Application {0} not found")]
    ApplicationNotFound(Uuid),

    #[error("{0}")]
    Validation(String),

    #[error("You have already applied to job {0}")]
    AlreadyApplied(Uuid),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ErrorMessage> for ServiceError {
    fn from(message: ErrorMessage) -> Self {
        match message {
            ErrorMessage::EmptyPassword | ErrorMessage::ExceededMaxPasswordLength(_) => {
                ServiceError::Validation(message.to_string())
            }
            ErrorMessage::WrongCredentials | ErrorMessage::EmailExist => {
                ServiceError::Validation(message.to_string())
            }
            ErrorMessage::InvalidToken
            | ErrorMessage::TokenNotProvided
            | ErrorMessage::UserNoLongerExist => ServiceError::Unauthenticated(message.to_string()),
            ErrorMessage::InvalidHashFormat | ErrorMessage::HashingError | ErrorMessage::ServerError => {
                ServiceError::Internal(message.to_string())
            }
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,

            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,

            ServiceError::JobNotFound(_) | ServiceError::ApplicationNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::AlreadyApplied(_) | ServiceError::Conflict(_) => StatusCode::CONFLICT,

            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();

        match error {
            // Persistence and runtime details stay in the logs.
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                tracing::error!("request failed: {}", error);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
            _ => HttpError::new(error.to_string(), status),
        }
    }
}
