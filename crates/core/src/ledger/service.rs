//! Tenant ledger service.
//!
//! Every operation takes the caller's [`AuthContext`]. Residents only ever see
//! rows that hang off their own profile; administrators read across tenants
//! but file payment notices only for their own profile.

use std::sync::Arc;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::{info, warn};
use villa_shared::types::{ProfileId, TransactionId, from_minor_units, to_minor_units};

use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::{
    NewTransaction, PaymentNotice, PaymentStatement, Personnel, ProfileInput, Transaction,
};
use crate::auth::AuthContext;

/// Per-owner profile and transaction ledger over an injected store.
pub struct TenantLedger<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> TenantLedger<S> {
    /// Creates a ledger.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates the actor's profile, or updates it if one exists.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Database` on storage failure.
    pub async fn upsert_profile(
        &self,
        actor: &AuthContext,
        input: ProfileInput,
    ) -> Result<ProfileId, LedgerError> {
        let profile = self.store.upsert_profile(actor.account_id(), input).await?;

        info!(account_id = %actor.account_id(), profile_id = %profile.id, "Profile saved");
        Ok(profile.id)
    }

    /// The actor's own profile, if they have created one.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Database` on storage failure.
    pub async fn my_profile(&self, actor: &AuthContext) -> Result<Option<Personnel>, LedgerError> {
        Ok(self.store.find_profile_by_owner(actor.account_id()).await?)
    }

    /// Profiles visible to the actor, ordered by ID.
    ///
    /// Residents get at most their own; administrators get everyone's.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Database` on storage failure.
    pub async fn list_profiles(&self, actor: &AuthContext) -> Result<Vec<Personnel>, LedgerError> {
        if actor.role().can_read_all_tenants() {
            return Ok(self.store.list_profiles().await?);
        }

        Ok(self
            .store
            .find_profile_by_owner(actor.account_id())
            .await?
            .into_iter()
            .collect())
    }

    /// Files a payment notice against the actor's own profile.
    ///
    /// # Arguments
    ///
    /// * `actor` - Verified caller; must own `notice.person_id`
    /// * `notice` - The payment; a missing timestamp means now
    ///
    /// # Errors
    ///
    /// * `LedgerError::ProfileNotOwned` if the profile is missing or belongs
    ///   to another account, administrators included
    /// * `LedgerError::InvalidAmount` if the amount is negative or has more
    ///   than two decimal places
    pub async fn record_transaction(
        &self,
        actor: &AuthContext,
        notice: PaymentNotice,
    ) -> Result<TransactionId, LedgerError> {
        let profile = self.store.find_profile(notice.person_id).await?;
        if profile.is_none_or(|p| p.owner != actor.account_id()) {
            warn!(
                account_id = %actor.account_id(),
                profile_id = %notice.person_id,
                "Payment notice filed against a profile the caller does not own"
            );
            return Err(LedgerError::ProfileNotOwned(notice.person_id));
        }

        let amount = validate_amount(notice.amount)?;
        let transaction = self
            .store
            .insert_transaction(NewTransaction {
                person_id: notice.person_id,
                amount,
                timestamp: notice
                    .timestamp
                    .unwrap_or_else(|| Local::now().naive_local()),
                proof_path: notice.proof_path,
                note: notice.note,
                category: notice.category,
            })
            .await?;

        info!(
            account_id = %actor.account_id(),
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            "Payment notice recorded"
        );
        Ok(transaction.id)
    }

    /// Transactions of one profile, newest first.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ProfileNotOwned` if a resident asks for a profile
    /// that is not theirs, or the profile does not exist.
    pub async fn list_transactions(
        &self,
        actor: &AuthContext,
        person_id: ProfileId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.readable_profile(actor, person_id).await?;
        Ok(self.store.list_transactions_for(person_id).await?)
    }

    /// Every tenant's transactions, newest first. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Forbidden` for residents.
    pub async fn list_all_transactions(
        &self,
        actor: &AuthContext,
    ) -> Result<Vec<Transaction>, LedgerError> {
        if !actor.role().can_read_all_tenants() {
            warn!(account_id = %actor.account_id(), "Cross-tenant listing attempted by resident");
            return Err(LedgerError::Forbidden(
                "only administrators can list all transactions".to_string(),
            ));
        }

        Ok(self.store.list_all_transactions().await?)
    }

    /// A profile's payment history with its total.
    ///
    /// # Errors
    ///
    /// Same access rule as [`Self::list_transactions`].
    pub async fn payment_statement(
        &self,
        actor: &AuthContext,
        person_id: ProfileId,
    ) -> Result<PaymentStatement, LedgerError> {
        let profile = self.readable_profile(actor, person_id).await?;
        let transactions = self.store.list_transactions_for(person_id).await?;

        Ok(PaymentStatement::new(profile, transactions))
    }

    async fn readable_profile(
        &self,
        actor: &AuthContext,
        person_id: ProfileId,
    ) -> Result<Personnel, LedgerError> {
        match self.store.find_profile(person_id).await? {
            Some(profile) if actor.may_read_owned_by(profile.owner) => Ok(profile),
            _ => {
                warn!(
                    account_id = %actor.account_id(),
                    profile_id = %person_id,
                    "Read of a profile the caller does not own"
                );
                Err(LedgerError::ProfileNotOwned(person_id))
            }
        }
    }
}

/// Rejects negative or over-precise amounts and rescales to two places.
pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::InvalidAmount(
            "amount cannot be negative".to_string(),
        ));
    }

    Ok(from_minor_units(to_minor_units(amount)?))
}
