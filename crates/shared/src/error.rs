//! Application-wide error type.
//!
//! Component errors (credential store, tenant ledger, receipt engine) convert
//! into `AppError` so the session gate has a single type to map onto its
//! own responses.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or a reset token was rejected.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied by role or ownership.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., duplicate username).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence layer failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code a gate should use for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may retry with the same input.
    ///
    /// Only infrastructure failures qualify; every domain error needs new input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "UNAUTHORIZED")]
    #[case(AppError::Forbidden(String::new()), 403, "FORBIDDEN")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::Conflict(String::new()), 409, "CONFLICT")]
    #[case(AppError::Database(String::new()), 500, "DATABASE_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Conflict("username taken".into()).to_string(),
            "Conflict: username taken"
        );
        assert_eq!(
            AppError::Forbidden("admin only".into()).to_string(),
            "Access denied: admin only"
        );
    }

    #[test]
    fn test_only_database_errors_are_retryable() {
        assert!(AppError::Database("timeout".into()).is_retryable());
        assert!(!AppError::Conflict("dup".into()).is_retryable());
        assert!(!AppError::Unauthorized("bad".into()).is_retryable());
    }
}
