//! Receipt persistence seam.

use async_trait::async_trait;
use villa_shared::types::TransactionId;

use crate::ledger::{Personnel, Transaction};
use crate::store::StoreError;

/// Storage operations the receipt engine needs.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Loads a transaction together with the profile it belongs to.
    async fn find_issuance_source(
        &self,
        id: TransactionId,
    ) -> Result<Option<(Transaction, Personnel)>, StoreError>;

    /// Adds one to the transaction's download count and returns the new value.
    ///
    /// Increment and read form one atomic unit: concurrent callers each see a
    /// distinct value. Returns `None` if the transaction does not exist.
    async fn increment_download_count(&self, id: TransactionId)
    -> Result<Option<i32>, StoreError>;
}
