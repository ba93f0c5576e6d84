//! Persistence failures shared by every store trait.

use thiserror::Error;

/// Error returned by store implementations.
///
/// Stores only distinguish what a service must react to: a uniqueness
/// conflict (duplicate username, second profile for an owner) versus any
/// other storage failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Any other storage failure.
    #[error("storage failure: {0}")]
    Database(String),
}
