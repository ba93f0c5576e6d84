//! Repository implementations of the core store traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod ledger;
pub mod receipt;

pub use account::AccountRepository;
pub use ledger::LedgerRepository;
pub use receipt::ReceiptRepository;

use sea_orm::{DbErr, SqlErr};
use villa_core::store::StoreError;

/// Maps a `SeaORM` error onto the store error the services understand.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict(detail),
        _ => StoreError::Database(err.to_string()),
    }
}
