//! Shared types, errors, and configuration for Villa Ledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for accounts, profiles and transactions
//! - Minor-unit conversion helpers for money amounts
//! - Application-wide error type
//! - Configuration management
//! - Signed password-reset tokens

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod jwt_tests;

pub use auth::ResetClaims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, ResetTokenService};
