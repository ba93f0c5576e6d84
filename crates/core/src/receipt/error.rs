//! Receipt error types.

use thiserror::Error;
use villa_shared::AppError;
use villa_shared::types::TransactionId;

use crate::store::StoreError;

/// Errors that can occur while issuing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// No transaction with this ID.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// The transaction's profile belongs to another account.
    #[error("Transaction {0} is not owned by caller")]
    ProfileNotOwned(TransactionId),

    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl ReceiptError {
    /// Returns the error code for the session gate.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::ProfileNotOwned(_) => "PROFILE_NOT_OWNED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ProfileNotOwned(_) => 403,
            Self::TransactionNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

impl From<StoreError> for ReceiptError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<ReceiptError> for AppError {
    fn from(err: ReceiptError) -> Self {
        let message = err.to_string();
        match err {
            ReceiptError::TransactionNotFound(_) => Self::NotFound(message),
            ReceiptError::ProfileNotOwned(_) => Self::Forbidden(message),
            ReceiptError::Database(_) => Self::Database(message),
        }
    }
}
