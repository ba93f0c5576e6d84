//! Personnel and transaction repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use villa_core::ledger::{LedgerStore, NewTransaction, Personnel, ProfileInput, Transaction};
use villa_core::store::StoreError;
use villa_shared::types::{AccountId, ProfileId, TransactionId, from_minor_units, to_minor_units};

use super::store_error;
use crate::entities::{personnel, transactions};

/// Ledger repository backing the tenant ledger.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn upsert_profile(
        &self,
        owner: AccountId,
        input: ProfileInput,
    ) -> Result<Personnel, StoreError> {
        let now = Utc::now();
        let profile = personnel::ActiveModel {
            id: NotSet,
            owner_account_id: Set(owner.into_inner()),
            name: Set(input.name),
            phone: Set(input.phone),
            address: Set(input.address),
            created_at: Set(now),
            updated_at: Set(now),
        };

        personnel::Entity::insert(profile)
            .on_conflict(
                OnConflict::column(personnel::Column::OwnerAccountId)
                    .update_columns([
                        personnel::Column::Name,
                        personnel::Column::Phone,
                        personnel::Column::Address,
                        personnel::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(store_error)?;

        self.find_profile_by_owner(owner).await?.ok_or_else(|| {
            StoreError::Database(format!("profile of account {owner} missing after upsert"))
        })
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<Personnel>, StoreError> {
        Ok(personnel::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(to_personnel))
    }

    async fn find_profile_by_owner(
        &self,
        owner: AccountId,
    ) -> Result<Option<Personnel>, StoreError> {
        Ok(personnel::Entity::find()
            .filter(personnel::Column::OwnerAccountId.eq(owner.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(to_personnel))
    }

    async fn list_profiles(&self) -> Result<Vec<Personnel>, StoreError> {
        Ok(personnel::Entity::find()
            .order_by_asc(personnel::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(to_personnel)
            .collect())
    }

    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let amount_minor = to_minor_units(transaction.amount)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let model = transactions::ActiveModel {
            id: NotSet,
            person_id: Set(transaction.person_id.into_inner()),
            amount_minor: Set(amount_minor),
            timestamp: Set(transaction.timestamp),
            proof_path: Set(transaction.proof_path),
            note: Set(transaction.note),
            category: Set(transaction.category),
            download_count: Set(0),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;

        Ok(to_transaction(model))
    }

    async fn list_transactions_for(
        &self,
        person_id: ProfileId,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(transactions::Entity::find()
            .filter(transactions::Column::PersonId.eq(person_id.into_inner()))
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(to_transaction)
            .collect())
    }

    async fn list_all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(transactions::Entity::find()
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(to_transaction)
            .collect())
    }
}

pub(crate) fn to_personnel(model: personnel::Model) -> Personnel {
    Personnel {
        id: ProfileId::new(model.id),
        owner: AccountId::new(model.owner_account_id),
        name: model.name,
        phone: model.phone,
        address: model.address,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub(crate) fn to_transaction(model: transactions::Model) -> Transaction {
    Transaction {
        id: TransactionId::new(model.id),
        person_id: ProfileId::new(model.person_id),
        amount: from_minor_units(model.amount_minor),
        timestamp: model.timestamp,
        proof_path: model.proof_path,
        note: model.note,
        category: model.category,
        download_count: model.download_count,
        created_at: model.created_at,
    }
}
