//! Ledger error types.

use thiserror::Error;
use villa_shared::AppError;
use villa_shared::types::{InvalidAmount, ProfileId};

use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Tenant Isolation ==========
    /// Profile is missing or not owned by the acting account.
    #[error("Profile {0} not found or not owned by caller")]
    ProfileNotOwned(ProfileId),

    /// Actor lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // ========== Validation ==========
    /// Amount is negative or has more than two decimal places.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ========== Database Errors ==========
    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for the session gate.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ProfileNotOwned(_) => "PROFILE_NOT_OWNED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_) => 400,
            Self::ProfileNotOwned(_) | Self::Forbidden(_) => 403,
            Self::Database(_) => 500,
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<InvalidAmount> for LedgerError {
    fn from(err: InvalidAmount) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::ProfileNotOwned(_) | LedgerError::Forbidden(_) => Self::Forbidden(message),
            LedgerError::InvalidAmount(_) => Self::Validation(message),
            LedgerError::Database(_) => Self::Database(message),
        }
    }
}
