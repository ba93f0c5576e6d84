//! Credential storage, authorization and password recovery.
//!
//! This module provides:
//! - Password and recovery-answer hashing with Argon2id
//! - Account roles and the per-call authorization context
//! - The credential store service (register, authenticate, role edits)
//! - The three-step recovery session (`START -> ANSWERED -> RESET`)

mod error;
mod password;
mod recovery;
mod service;
mod store;


pub use error::AuthError;
pub use password::{PasswordError, hash_secret, normalize_answer, verify_secret};
pub use recovery::{RecoveryChallenge, RecoverySession, RecoveryStep, ResetToken};
pub use service::{CredentialStore, RegisterAccount};
pub use store::{Account, AccountStore, NewAccount};

use serde::{Deserialize, Serialize};
use villa_shared::types::AccountId;

/// Username that is promoted to administrator at registration.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Resident: sees only their own profile and transactions.
    User,
    /// Committee/administrator: reads across tenants and edits roles.
    Admin,
}

impl UserRole {
    /// Returns true if this role may read every tenant's rows.
    #[must_use]
    pub const fn can_read_all_tenants(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role may change other accounts' roles.
    #[must_use]
    pub const fn can_manage_roles(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the string stored in the `role` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses a stored role string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Role assigned at registration.
    ///
    /// A username equal to `admin` in any letter case bootstraps the
    /// administrator; everyone else starts as a resident.
    #[must_use]
    pub fn for_new_username(username: &str) -> Self {
        if username.to_lowercase() == BOOTSTRAP_ADMIN_USERNAME {
            Self::Admin
        } else {
            Self::User
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified identity of the caller, passed into every ledger and receipt call.
///
/// The session gate obtains one from [`CredentialStore::authenticate`] and
/// keeps it for the duration of the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    account_id: AccountId,
    role: UserRole,
}

impl AuthContext {
    /// Builds a context for an account whose identity was already verified.
    #[must_use]
    pub const fn new(account_id: AccountId, role: UserRole) -> Self {
        Self { account_id, role }
    }

    /// The acting account.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// The acting account's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns true if the actor is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Returns true if the actor may touch rows owned by `owner`.
    #[must_use]
    pub fn may_read_owned_by(&self, owner: AccountId) -> bool {
        self.role.can_read_all_tenants() || self.account_id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", UserRole::Admin)]
    #[case("ADMIN", UserRole::Admin)]
    #[case("Admin", UserRole::Admin)]
    #[case("alice", UserRole::User)]
    #[case("administrator", UserRole::User)]
    #[case(" admin", UserRole::User)]
    fn test_role_for_new_username(#[case] username: &str, #[case] expected: UserRole) {
        assert_eq!(UserRole::for_new_username(username), expected);
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.can_read_all_tenants());
        assert!(UserRole::Admin.can_manage_roles());
        assert!(!UserRole::User.can_read_all_tenants());
        assert!(!UserRole::User.can_manage_roles());
    }

    #[test]
    fn test_role_string_roundtrip() {
        for role in [UserRole::User, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("owner"), None);
    }

    #[test]
    fn test_context_ownership() {
        let alice = AuthContext::new(AccountId::new(1), UserRole::User);
        let admin = AuthContext::new(AccountId::new(2), UserRole::Admin);

        assert!(alice.may_read_owned_by(AccountId::new(1)));
        assert!(!alice.may_read_owned_by(AccountId::new(3)));
        assert!(admin.may_read_owned_by(AccountId::new(3)));
    }
}
