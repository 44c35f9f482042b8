//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("An account with this email already exists")]
    DuplicateIdentity,

    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    AuthFailure,

    /// No usable bearer token on a protected route
    #[error("Token not provided")]
    MissingToken,

    /// Bad signature, malformed token, or past expiry
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("User not found")]
    AccountNotFound,

    /// Input rejected by a value object
    #[error("{0}")]
    Validation(String),

    /// Database error (details are logged, never returned)
    #[error("Internal server error")]
    StorageUnavailable(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal server error")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateIdentity | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::AuthFailure | AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::InvalidOrExpiredToken => ErrorKind::Forbidden,
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::StorageUnavailable(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::MissingToken => {
                err.with_action("Send an Authorization: Bearer <token> header")
            }
            AuthError::InvalidOrExpiredToken => err.with_action("Log in again"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::AuthFailure => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOrExpiredToken => {
                tracing::debug!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Client errors from value objects become `Validation`; anything else is
/// internal.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::DuplicateIdentity.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::AuthFailure.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidOrExpiredToken.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::AccountNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::StorageUnavailable(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_not_exposed() {
        let err = AuthError::StorageUnavailable(sqlx::Error::Protocol("relation missing".into()));
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_from_app_error() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::Validation(ref msg) if msg == "Invalid email format"));

        let err: AuthError = AppError::internal("boom").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
