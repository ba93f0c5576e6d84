//! Signed password-reset tokens.
//!
//! A reset token is an HS256 JWT handed out after a correct recovery answer.
//! It is the only thing that authorizes `complete_password_reset`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::{RESET_PURPOSE, ResetClaims};
use crate::types::AccountId;

/// Upper bound on a reset token's lifetime (one day).
const MAX_EXPIRY_SECS: u64 = 86_400;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token decoded but was not issued for a password reset.
    #[error("invalid token")]
    Invalid,
}

/// Issues and validates password-reset tokens.
#[derive(Clone)]
pub struct ResetTokenService {
    expiry: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for ResetTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetTokenService")
            .field("expiry", &self.expiry)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl ResetTokenService {
    /// Creates a token service from a signing secret and a token lifetime.
    #[must_use]
    pub fn new(secret: &str, expiry_secs: u64) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let expiry = Duration::seconds(expiry_secs.min(MAX_EXPIRY_SECS) as i64);
        Self {
            expiry,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Creates a token service from the recovery section of the configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::RecoveryConfig) -> Self {
        Self::new(&config.secret, config.token_expiry_secs)
    }

    /// Issues a reset token for an account.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue(
        &self,
        account_id: AccountId,
        username: &str,
        version: i64,
    ) -> Result<String, JwtError> {
        self.issue_expiring_at(account_id, username, version, Utc::now() + self.expiry)
    }

    pub(crate) fn issue_expiring_at(
        &self,
        account_id: AccountId,
        username: &str,
        version: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = ResetClaims::new(account_id, username, version, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a reset token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::Invalid` if the token was not issued for a reset.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate(&self, token: &str) -> Result<ResetClaims, JwtError> {
        let claims = decode::<ResetClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })?;

        if claims.purpose != RESET_PURPOSE {
            return Err(JwtError::Invalid);
        }
        Ok(claims)
    }

    /// Returns the token lifetime in seconds.
    #[must_use]
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry.num_seconds()
    }
}
