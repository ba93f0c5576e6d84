//! Three-step password recovery.
//!
//! The protocol is `START -> ANSWERED -> RESET -> START`. A [`RecoverySession`]
//! belongs to one interactive session and is never shared or persisted; the
//! session gate keeps it next to whatever else it stores per visitor.

use serde::Serialize;

use super::error::AuthError;
use super::service::CredentialStore;
use super::store::AccountStore;

/// Security question presented to someone who forgot their password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryChallenge {
    /// Username the challenge was issued for.
    pub username: String,
    /// The account's security question.
    pub question: String,
}

/// Signed proof that the recovery answer was correct.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
    /// Wraps a token string received back from the session gate.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ResetToken([hidden])")
    }
}

/// Observable step of a recovery session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryStep {
    /// Waiting for a username.
    Start,
    /// Challenge shown, waiting for the answer.
    Answered,
    /// Answer verified, waiting for the new password.
    Reset,
}

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Start,
    Answered(RecoveryChallenge),
    Reset(ResetToken),
}

/// Per-session driver of the recovery protocol.
///
/// Each step is only accepted in its own state; anything else fails with
/// [`AuthError::TokenExpiredOrInvalid`] and leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct RecoverySession {
    state: SessionState,
}

impl RecoverySession {
    /// Creates a session in `START`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> RecoveryStep {
        match self.state {
            SessionState::Start => RecoveryStep::Start,
            SessionState::Answered(_) => RecoveryStep::Answered,
            SessionState::Reset(_) => RecoveryStep::Reset,
        }
    }

    /// The challenge being answered, while in `ANSWERED`.
    #[must_use]
    pub fn challenge(&self) -> Option<&RecoveryChallenge> {
        match &self.state {
            SessionState::Answered(challenge) => Some(challenge),
            _ => None,
        }
    }

    /// `START -> ANSWERED`: looks up the security question for `username`.
    pub async fn begin<S: AccountStore>(
        &mut self,
        store: &CredentialStore<S>,
        username: &str,
    ) -> Result<&RecoveryChallenge, AuthError> {
        if !matches!(self.state, SessionState::Start) {
            return Err(AuthError::TokenExpiredOrInvalid);
        }

        let challenge = store.begin_password_reset(username).await?;
        self.state = SessionState::Answered(challenge);
        match &self.state {
            SessionState::Answered(challenge) => Ok(challenge),
            _ => Err(AuthError::Internal("recovery state lost".to_string())),
        }
    }

    /// `ANSWERED -> RESET` on a correct answer; a wrong answer keeps `ANSWERED`.
    pub async fn answer<S: AccountStore>(
        &mut self,
        store: &CredentialStore<S>,
        answer: &str,
    ) -> Result<(), AuthError> {
        let SessionState::Answered(challenge) = &self.state else {
            return Err(AuthError::TokenExpiredOrInvalid);
        };

        let token = store.verify_recovery_answer(challenge, answer).await?;
        self.state = SessionState::Reset(token);
        Ok(())
    }

    /// `RESET -> START` once the new password is stored.
    ///
    /// A mismatched confirmation keeps `RESET` so the visitor can retype; an
    /// expired token sends the session back to `START`.
    pub async fn complete<S: AccountStore>(
        &mut self,
        store: &CredentialStore<S>,
        new_password: &str,
        confirmation: Option<&str>,
    ) -> Result<(), AuthError> {
        let SessionState::Reset(token) = &self.state else {
            return Err(AuthError::TokenExpiredOrInvalid);
        };

        let result = store
            .complete_password_reset(token, new_password, confirmation)
            .await;
        match result {
            Ok(()) => {
                self.state = SessionState::Start;
                Ok(())
            }
            Err(AuthError::TokenExpiredOrInvalid) => {
                self.state = SessionState::Start;
                Err(AuthError::TokenExpiredOrInvalid)
            }
            Err(e) => Err(e),
        }
    }

    /// Abandons the protocol from any step.
    pub fn cancel(&mut self) {
        self.state = SessionState::Start;
    }
}
