//! Credential store error types.

use thiserror::Error;
use villa_shared::AppError;

use super::password::PasswordError;
use crate::store::StoreError;

/// Errors that can occur during registration, login, recovery and role edits.
#[derive(Debug, Error)]
pub enum AuthError {
    // ========== Registration ==========
    /// Username already registered (exact, case-sensitive match).
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Required input was empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========== Authentication & Recovery ==========
    /// Unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No account with this username.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Recovery answer did not match.
    #[error("Recovery answer is incorrect")]
    WrongAnswer,

    /// Reset step called out of order, or the reset token is forged or expired.
    #[error("Password reset token is expired or invalid")]
    TokenExpiredOrInvalid,

    /// New password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordsMismatch,

    // ========== Authorization ==========
    /// Actor lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An administrator tried to change their own role.
    #[error("Administrators cannot change their own role")]
    SelfRoleChangeDenied,

    // ========== Infrastructure ==========
    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Hashing or token signing failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns the error code for the session gate.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateUsername(_) => "DUPLICATE_USERNAME",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UnknownUser(_) => "UNKNOWN_USER",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::TokenExpiredOrInvalid => "TOKEN_EXPIRED_OR_INVALID",
            Self::PasswordsMismatch => "PASSWORDS_MISMATCH",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::SelfRoleChangeDenied => "SELF_ROLE_CHANGE_DENIED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::PasswordsMismatch => 400,
            Self::InvalidCredentials | Self::WrongAnswer | Self::TokenExpiredOrInvalid => 401,
            Self::Forbidden(_) | Self::SelfRoleChangeDenied => 403,
            Self::UnknownUser(_) => 404,
            Self::DuplicateUsername(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if the caller may simply try again with different input.
    #[must_use]
    pub fn is_retryable_with_new_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::UnknownUser(_) | Self::WrongAnswer
        )
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::DuplicateUsername(_) => Self::Conflict(message),
            AuthError::InvalidInput(_) | AuthError::PasswordsMismatch => Self::Validation(message),
            AuthError::InvalidCredentials
            | AuthError::WrongAnswer
            | AuthError::TokenExpiredOrInvalid => Self::Unauthorized(message),
            AuthError::UnknownUser(_) => Self::NotFound(message),
            AuthError::Forbidden(_) | AuthError::SelfRoleChangeDenied => Self::Forbidden(message),
            AuthError::Database(_) => Self::Database(message),
            AuthError::Internal(_) => Self::Internal(message),
        }
    }
}
