//! Receipt repository: issuance lookups and the download counter.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use tracing::debug;
use villa_core::ledger::{Personnel, Transaction};
use villa_core::receipt::ReceiptStore;
use villa_core::store::StoreError;
use villa_shared::types::TransactionId;

use super::ledger::{to_personnel, to_transaction};
use super::store_error;
use crate::entities::{personnel, transactions};

/// Receipt repository backing the receipt engine.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    db: DatabaseConnection,
}

impl ReceiptRepository {
    /// Creates a new receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReceiptStore for ReceiptRepository {
    async fn find_issuance_source(
        &self,
        id: TransactionId,
    ) -> Result<Option<(Transaction, Personnel)>, StoreError> {
        let row = transactions::Entity::find_by_id(id.into_inner())
            .find_also_related(personnel::Entity)
            .one(&self.db)
            .await
            .map_err(store_error)?;

        Ok(row.and_then(|(transaction, profile)| {
            profile.map(|profile| (to_transaction(transaction), to_personnel(profile)))
        }))
    }

    async fn increment_download_count(
        &self,
        id: TransactionId,
    ) -> Result<Option<i32>, StoreError> {
        // The row lock taken by the UPDATE is held until commit, so the value
        // read back is the one this call produced.
        let txn = self.db.begin().await.map_err(store_error)?;

        let result = transactions::Entity::update_many()
            .col_expr(
                transactions::Column::DownloadCount,
                Expr::col(transactions::Column::DownloadCount).add(1),
            )
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .exec(&txn)
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(store_error)?;
            return Ok(None);
        }

        let count = transactions::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await
            .map_err(store_error)?
            .map(|row| row.download_count);

        txn.commit().await.map_err(store_error)?;

        debug!(transaction_id = %id, ?count, "Download count incremented");
        Ok(count)
    }
}
