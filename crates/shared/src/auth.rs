//! Claims carried by password-reset tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AccountId;

/// Purpose marker so a reset token cannot be confused with any other token
/// signed with the same secret.
pub const RESET_PURPOSE: &str = "password_reset";

/// JWT claims proving that a recovery answer was verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetClaims {
    /// Subject (username the challenge was issued for).
    pub sub: String,
    /// Account ID.
    pub aid: AccountId,
    /// Account version (last-update time in microseconds) the token was
    /// issued against. Any later update to the account invalidates the token.
    pub ver: i64,
    /// Always [`RESET_PURPOSE`].
    pub purpose: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl ResetClaims {
    /// Creates reset claims for an account.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        username: &str,
        version: i64,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: username.to_string(),
            aid: account_id,
            ver: version,
            purpose: RESET_PURPOSE.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the account the reset applies to.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.aid
    }

    /// Returns the account version the token is bound to.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.ver
    }

    /// Returns the username the reset applies to.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.sub
    }
}
