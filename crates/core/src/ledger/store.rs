//! Ledger persistence seam.

use async_trait::async_trait;
use villa_shared::types::{AccountId, ProfileId};

use super::types::{NewTransaction, Personnel, ProfileInput, Transaction};
use crate::store::StoreError;

/// Storage operations the tenant ledger needs.
///
/// Implementations do no authorization; the ledger checks ownership before
/// every call that touches another tenant's rows.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Inserts the owner's profile or updates it in place.
    async fn upsert_profile(
        &self,
        owner: AccountId,
        input: ProfileInput,
    ) -> Result<Personnel, StoreError>;

    /// Finds a profile by ID.
    async fn find_profile(&self, id: ProfileId) -> Result<Option<Personnel>, StoreError>;

    /// Finds the profile owned by an account.
    async fn find_profile_by_owner(
        &self,
        owner: AccountId,
    ) -> Result<Option<Personnel>, StoreError>;

    /// All profiles ordered by ID.
    async fn list_profiles(&self) -> Result<Vec<Personnel>, StoreError>;

    /// Inserts a transaction with `download_count = 0`.
    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError>;

    /// Transactions of one profile, newest first.
    async fn list_transactions_for(
        &self,
        person_id: ProfileId,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Every transaction, newest first.
    async fn list_all_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
}
