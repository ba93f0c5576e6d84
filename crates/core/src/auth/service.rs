//! Credential store service.
//!
//! Registration, login, role edits and the server side of password recovery.
//! Persistence goes through [`AccountStore`]; reset tokens are signed by
//! [`ResetTokenService`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use villa_shared::ResetTokenService;
use villa_shared::jwt::JwtError;
use villa_shared::types::AccountId;

use super::error::AuthError;
use super::password::{hash_secret, normalize_answer, verify_secret};
use super::recovery::{RecoveryChallenge, ResetToken};
use super::store::{Account, AccountStore, NewAccount};
use super::{AuthContext, UserRole};
use crate::store::StoreError;

/// Input for [`CredentialStore::register`].
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    /// Unique, case-sensitive username.
    pub username: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Role asked for on the sign-up form. Advisory only and never trusted.
    pub role_hint: Option<UserRole>,
    /// Security question.
    pub recovery_question: String,
    /// Plaintext answer; normalized and hashed before it reaches the store.
    pub recovery_answer: String,
}

/// Credential store over an injected account store.
pub struct CredentialStore<S> {
    accounts: Arc<S>,
    tokens: ResetTokenService,
}

impl<S: AccountStore> CredentialStore<S> {
    /// Creates a credential store.
    #[must_use]
    pub const fn new(accounts: Arc<S>, tokens: ResetTokenService) -> Self {
        Self { accounts, tokens }
    }

    /// Registers a new account.
    ///
    /// The role is derived from the username: `admin` in any letter case
    /// becomes an administrator, everyone else a resident. `role_hint` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidInput` if the username or password is empty
    /// * `AuthError::DuplicateUsername` if the username is taken
    pub async fn register(&self, input: RegisterAccount) -> Result<AccountId, AuthError> {
        if input.username.trim().is_empty() {
            return Err(AuthError::InvalidInput("username is required".to_string()));
        }
        if input.password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_string()));
        }

        if self
            .accounts
            .find_account_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUsername(input.username));
        }

        let role = UserRole::for_new_username(&input.username);
        if let Some(hint) = input.role_hint.filter(|hint| *hint != role) {
            debug!(
                username = %input.username,
                requested = %hint,
                assigned = %role,
                "Ignoring role hint"
            );
        }

        let new_account = NewAccount {
            username: input.username.clone(),
            password_hash: hash_secret(&input.password)?,
            role,
            recovery_question: input.recovery_question,
            recovery_answer_hash: hash_secret(&normalize_answer(&input.recovery_answer))?,
        };

        let account = match self.accounts.insert_account(new_account).await {
            Ok(account) => account,
            // Lost a race with a concurrent registration.
            Err(StoreError::Conflict(_)) => {
                return Err(AuthError::DuplicateUsername(input.username));
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            account_id = %account.id,
            username = %account.username,
            role = %account.role,
            "New account registered"
        );
        Ok(account.id)
    }

    /// Verifies a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown username or a
    /// wrong password; the two are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthContext, AuthError> {
        let Some(account) = self.accounts.find_account_by_username(username).await? else {
            info!(username = %username, "Login attempt for non-existent user");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_secret(password, &account.password_hash)? {
            info!(account_id = %account.id, "Failed login attempt - invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(account_id = %account.id, "User logged in successfully");
        Ok(AuthContext::new(account.id, account.role))
    }

    /// Recovery step 1: returns the security question for `username`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownUser` if no such account exists.
    pub async fn begin_password_reset(
        &self,
        username: &str,
    ) -> Result<RecoveryChallenge, AuthError> {
        let account = self.account_by_username(username).await?;

        debug!(account_id = %account.id, "Password recovery started");
        Ok(RecoveryChallenge {
            username: account.username,
            question: account.recovery_question,
        })
    }

    /// Recovery step 2: checks the answer and issues a reset token.
    ///
    /// The answer is compared after trimming and lowercasing.
    ///
    /// # Errors
    ///
    /// * `AuthError::UnknownUser` if the account disappeared
    /// * `AuthError::WrongAnswer` if the answer does not match
    pub async fn verify_recovery_answer(
        &self,
        challenge: &RecoveryChallenge,
        answer: &str,
    ) -> Result<ResetToken, AuthError> {
        let account = self.account_by_username(&challenge.username).await?;

        if !verify_secret(&normalize_answer(answer), &account.recovery_answer_hash)? {
            warn!(account_id = %account.id, "Wrong recovery answer");
            return Err(AuthError::WrongAnswer);
        }

        let token = self
            .tokens
            .issue(account.id, &account.username, account_version(&account))
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(account_id = %account.id, "Recovery answer verified, reset token issued");
        Ok(ResetToken::new(token))
    }

    /// Recovery step 3: stores the new password.
    ///
    /// A token stops working once the account's password changes, so each
    /// token resets the password at most once.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenExpiredOrInvalid` if the token is forged, expired
    ///   or already used
    /// * `AuthError::PasswordsMismatch` if `confirmation` is given and differs
    /// * `AuthError::InvalidInput` if the new password is empty
    pub async fn complete_password_reset(
        &self,
        token: &ResetToken,
        new_password: &str,
        confirmation: Option<&str>,
    ) -> Result<(), AuthError> {
        let claims = self.tokens.validate(token.as_str()).map_err(|e| {
            match e {
                JwtError::Expired => debug!("Reset token expired"),
                _ => warn!(error = %e, "Rejected reset token"),
            }
            AuthError::TokenExpiredOrInvalid
        })?;

        let account = self
            .accounts
            .find_account(claims.account_id())
            .await?
            .filter(|account| account_version(account) == claims.version())
            .ok_or(AuthError::TokenExpiredOrInvalid)?;

        if confirmation.is_some_and(|confirmation| confirmation != new_password) {
            return Err(AuthError::PasswordsMismatch);
        }
        if new_password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_string()));
        }

        let password_hash = hash_secret(new_password)?;
        if !self
            .accounts
            .update_password_hash_if_unchanged(account.id, account.updated_at, &password_hash)
            .await?
        {
            debug!(account_id = %account.id, "Reset token lost a race with another update");
            return Err(AuthError::TokenExpiredOrInvalid);
        }

        info!(account_id = %account.id, "Password reset completed");
        Ok(())
    }

    /// Changes the actor's own password after re-checking the current one.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` if `current_password` is wrong
    /// * `AuthError::InvalidInput` if the new password is empty
    pub async fn change_password(
        &self,
        actor: &AuthContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let account = self
            .accounts
            .find_account(actor.account_id())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_secret(current_password, &account.password_hash)? {
            info!(account_id = %account.id, "Password change refused - invalid current password");
            return Err(AuthError::InvalidCredentials);
        }
        if new_password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_string()));
        }

        let password_hash = hash_secret(new_password)?;
        if !self
            .accounts
            .update_password_hash(account.id, &password_hash)
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        info!(account_id = %account.id, "Password changed");
        Ok(())
    }

    /// Sets another account's role.
    ///
    /// # Arguments
    ///
    /// * `actor` - Verified caller; must be an administrator
    /// * `target_username` - Account whose role changes
    /// * `new_role` - Role to assign
    ///
    /// # Errors
    ///
    /// * `AuthError::Forbidden` if the actor is not an administrator
    /// * `AuthError::UnknownUser` if the target does not exist
    /// * `AuthError::SelfRoleChangeDenied` if the target is the actor
    pub async fn set_role(
        &self,
        actor: &AuthContext,
        target_username: &str,
        new_role: UserRole,
    ) -> Result<(), AuthError> {
        if !actor.role().can_manage_roles() {
            warn!(account_id = %actor.account_id(), "Role change attempted by non-administrator");
            return Err(AuthError::Forbidden(
                "only administrators can change roles".to_string(),
            ));
        }

        let target = self.account_by_username(target_username).await?;
        if target.id == actor.account_id() {
            return Err(AuthError::SelfRoleChangeDenied);
        }

        if !self.accounts.update_role(target.id, new_role).await? {
            return Err(AuthError::UnknownUser(target_username.to_string()));
        }

        info!(
            actor_id = %actor.account_id(),
            target_id = %target.id,
            from = %target.role,
            to = %new_role,
            "Account role changed"
        );
        Ok(())
    }

    async fn account_by_username(&self, username: &str) -> Result<Account, AuthError> {
        self.accounts
            .find_account_by_username(username)
            .await?
            .ok_or_else(|| AuthError::UnknownUser(username.to_string()))
    }
}

/// Version stamp a reset token is bound to.
fn account_version(account: &Account) -> i64 {
    account.updated_at.timestamp_micros()
}
