//! Help Desk Error Types

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type HelpdeskResult<T> = Result<T, HelpdeskError>;

#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// Record absent, or not visible to the caller
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique field collided
    #[error("{0} already exists")]
    Duplicate(&'static str),

    /// A referenced id does not exist
    #[error("Unknown {0}")]
    UnknownReference(&'static str),

    #[error("{0}")]
    Validation(String),

    /// Failure while finding or creating the technician's account
    #[error(transparent)]
    Account(#[from] AuthError),

    /// Database error (details are logged, never returned)
    #[error("Internal server error")]
    Storage(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(String),
}

impl HelpdeskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HelpdeskError::NotFound(_) => ErrorKind::NotFound,
            HelpdeskError::Duplicate(_)
            | HelpdeskError::UnknownReference(_)
            | HelpdeskError::Validation(_) => ErrorKind::BadRequest,
            HelpdeskError::Account(err) => err.kind(),
            HelpdeskError::Storage(_) | HelpdeskError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            HelpdeskError::Account(err) => err.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            HelpdeskError::Storage(e) => {
                tracing::error!(error = %e, "Helpdesk database error");
            }
            HelpdeskError::Internal(msg) => {
                tracing::error!(message = %msg, "Helpdesk internal error");
            }
            HelpdeskError::Account(err) if err.kind().is_server_error() => {
                tracing::error!(error = ?err, "Account store error");
            }
            _ => {
                tracing::debug!(error = %self, "Helpdesk error");
            }
        }
    }
}

impl IntoResponse for HelpdeskError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for HelpdeskError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            HelpdeskError::Validation(err.message().to_string())
        } else {
            HelpdeskError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(HelpdeskError::NotFound("Ticket").kind().status_code(), 404);
        assert_eq!(
            HelpdeskError::Duplicate("Incident type").to_string(),
            "Incident type already exists"
        );
        assert_eq!(
            HelpdeskError::UnknownReference("request type").kind().status_code(),
            400
        );
        assert_eq!(
            HelpdeskError::Storage(sqlx::Error::PoolClosed)
                .to_app_error()
                .message(),
            "Internal server error"
        );
    }

    #[test]
    fn test_account_errors_keep_their_status() {
        let err = HelpdeskError::from(AuthError::DuplicateIdentity);
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = HelpdeskError::from(AuthError::Validation("Invalid email format".into()));
        assert_eq!(err.to_app_error().message(), "Invalid email format");
    }
}
