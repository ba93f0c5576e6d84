//! In-memory store.
//!
//! Implements every store trait over maps guarded by one `RwLock`. Used by
//! unit tests and local experiments; nothing survives a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use villa_shared::types::{AccountId, ProfileId, TransactionId};

use crate::auth::{Account, AccountStore, NewAccount, UserRole};
use crate::ledger::types::newest_first;
use crate::ledger::{LedgerStore, NewTransaction, Personnel, ProfileInput, Transaction};
use crate::receipt::ReceiptStore;
use crate::store::StoreError;

#[derive(Debug, Default)]
struct MemoryState {
    accounts: BTreeMap<AccountId, Account>,
    profiles: BTreeMap<ProfileId, Personnel>,
    transactions: BTreeMap<TransactionId, Transaction>,
    next_id: i64,
}

impl MemoryState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe in-memory implementation of all store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut state = self.state.write().await;
        if state
            .accounts
            .values()
            .any(|existing| existing.username == account.username)
        {
            return Err(StoreError::Conflict(format!(
                "username {} already exists",
                account.username
            )));
        }

        let now = Utc::now();
        let id = AccountId::new(state.allocate_id());
        let stored = Account {
            id,
            username: account.username,
            password_hash: account.password_hash,
            role: account.role,
            recovery_question: account.recovery_question,
            recovery_answer_hash: account.recovery_answer_hash,
            created_at: now,
            updated_at: now,
        };
        state.accounts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let Some(account) = state.accounts.get_mut(&id) else {
            return Ok(false);
        };
        account.password_hash = password_hash.to_string();
        account.updated_at = bump(account.updated_at);
        Ok(true)
    }

    async fn update_password_hash_if_unchanged(
        &self,
        id: AccountId,
        expected_updated_at: chrono::DateTime<Utc>,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let Some(account) = state
            .accounts
            .get_mut(&id)
            .filter(|account| account.updated_at == expected_updated_at)
        else {
            return Ok(false);
        };
        account.password_hash = password_hash.to_string();
        account.updated_at = bump(account.updated_at);
        Ok(true)
    }

    async fn update_role(&self, id: AccountId, role: UserRole) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let Some(account) = state.accounts.get_mut(&id) else {
            return Ok(false);
        };
        account.role = role;
        account.updated_at = bump(account.updated_at);
        Ok(true)
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn upsert_profile(
        &self,
        owner: AccountId,
        input: ProfileInput,
    ) -> Result<Personnel, StoreError> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        if let Some(profile) = state.profiles.values_mut().find(|p| p.owner == owner) {
            profile.name = input.name;
            profile.phone = input.phone;
            profile.address = input.address;
            profile.updated_at = now;
            return Ok(profile.clone());
        }

        let id = ProfileId::new(state.allocate_id());
        let profile = Personnel {
            id,
            owner,
            name: input.name,
            phone: input.phone,
            address: input.address,
            created_at: now,
            updated_at: now,
        };
        state.profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<Personnel>, StoreError> {
        Ok(self.state.read().await.profiles.get(&id).cloned())
    }

    async fn find_profile_by_owner(
        &self,
        owner: AccountId,
    ) -> Result<Option<Personnel>, StoreError> {
        let state = self.state.read().await;
        Ok(state.profiles.values().find(|p| p.owner == owner).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Personnel>, StoreError> {
        Ok(self.state.read().await.profiles.values().cloned().collect())
    }

    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut state = self.state.write().await;
        if !state.profiles.contains_key(&transaction.person_id) {
            return Err(StoreError::Database(format!(
                "foreign key violation: profile {} does not exist",
                transaction.person_id
            )));
        }

        let id = TransactionId::new(state.allocate_id());
        let stored = Transaction {
            id,
            person_id: transaction.person_id,
            amount: transaction.amount,
            timestamp: transaction.timestamp,
            proof_path: transaction.proof_path,
            note: transaction.note,
            category: transaction.category,
            download_count: 0,
            created_at: Utc::now(),
        };
        state.transactions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_transactions_for(
        &self,
        person_id: ProfileId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|t| t.person_id == person_id)
            .cloned()
            .collect();
        rows.sort_by(newest_first);
        Ok(rows)
    }

    async fn list_all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<Transaction> = state.transactions.values().cloned().collect();
        rows.sort_by(newest_first);
        Ok(rows)
    }
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn find_issuance_source(
        &self,
        id: TransactionId,
    ) -> Result<Option<(Transaction, Personnel)>, StoreError> {
        let state = self.state.read().await;
        Ok(state.transactions.get(&id).and_then(|transaction| {
            state
                .profiles
                .get(&transaction.person_id)
                .map(|profile| (transaction.clone(), profile.clone()))
        }))
    }

    async fn increment_download_count(
        &self,
        id: TransactionId,
    ) -> Result<Option<i32>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.transactions.get_mut(&id).map(|transaction| {
            transaction.download_count += 1;
            transaction.download_count
        }))
    }
}

/// Next update time, strictly later than `previous` even on a coarse clock.
fn bump(previous: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
    Utc::now().max(previous + chrono::Duration::microseconds(1))
}
