//! Account persistence seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use villa_shared::types::AccountId;

use super::UserRole;
use crate::store::StoreError;

/// A stored login account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Unique, case-sensitive username.
    pub username: String,
    /// Argon2id PHC string of the password.
    pub password_hash: String,
    /// Role.
    pub role: UserRole,
    /// Security question shown during recovery.
    pub recovery_question: String,
    /// Argon2id PHC string of the normalized recovery answer.
    pub recovery_answer_hash: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last password or role change.
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert an account; hashes are computed by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Username.
    pub username: String,
    /// Argon2id PHC string of the password.
    pub password_hash: String,
    /// Role derived at registration.
    pub role: UserRole,
    /// Security question.
    pub recovery_question: String,
    /// Argon2id PHC string of the normalized recovery answer.
    pub recovery_answer_hash: String,
}

/// Storage operations the credential store needs.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts an account.
    ///
    /// Returns `StoreError::Conflict` if the username is taken.
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Finds an account by exact username.
    async fn find_account_by_username(&self, username: &str)
    -> Result<Option<Account>, StoreError>;

    /// Finds an account by ID.
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Replaces the password hash. Returns false if the account does not exist.
    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<bool, StoreError>;

    /// Replaces the password hash only while `updated_at` still equals
    /// `expected_updated_at`.
    ///
    /// Returns false if the account does not exist or changed in between.
    async fn update_password_hash_if_unchanged(
        &self,
        id: AccountId,
        expected_updated_at: DateTime<Utc>,
        password_hash: &str,
    ) -> Result<bool, StoreError>;

    /// Replaces the role. Returns false if the account does not exist.
    async fn update_role(&self, id: AccountId, role: UserRole) -> Result<bool, StoreError>;
}
