//! Receipt issuance engine.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use villa_shared::types::TransactionId;

use super::error::ReceiptError;
use super::number::receipt_number;
use super::store::ReceiptStore;
use super::types::{Receipt, ReceiptStatus};
use super::words::{Locale, amount_in_words};
use crate::auth::AuthContext;

/// Issues receipts and tracks ORIGINAL vs COPY through the download counter.
pub struct ReceiptEngine<S> {
    store: Arc<S>,
    locale: Locale,
}

impl<S: ReceiptStore> ReceiptEngine<S> {
    /// Creates an engine writing amounts in `locale`.
    #[must_use]
    pub const fn new(store: Arc<S>, locale: Locale) -> Self {
        Self { store, locale }
    }

    /// Locale used for the amount-in-words line.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Issues a receipt for a transaction.
    ///
    /// Ownership is checked before the counter moves, so a refused request
    /// leaves the count untouched. The first successful issuance is the
    /// ORIGINAL; every later one is a COPY carrying the same number.
    ///
    /// # Errors
    ///
    /// * `ReceiptError::TransactionNotFound` if the id does not resolve
    /// * `ReceiptError::ProfileNotOwned` if a resident asks for another
    ///   tenant's transaction
    pub async fn issue_receipt(
        &self,
        actor: &AuthContext,
        transaction_id: TransactionId,
    ) -> Result<Receipt, ReceiptError> {
        let (transaction, profile) = self
            .store
            .find_issuance_source(transaction_id)
            .await?
            .ok_or(ReceiptError::TransactionNotFound(transaction_id))?;

        if !actor.may_read_owned_by(profile.owner) {
            warn!(
                account_id = %actor.account_id(),
                transaction_id = %transaction_id,
                "Receipt requested for a transaction the caller does not own"
            );
            return Err(ReceiptError::ProfileNotOwned(transaction_id));
        }

        let download_count = self
            .store
            .increment_download_count(transaction_id)
            .await?
            .ok_or(ReceiptError::TransactionNotFound(transaction_id))?;
        let status = ReceiptStatus::from_download_count(download_count);

        let receipt = Receipt {
            receipt_no: receipt_number(&transaction),
            status,
            transaction_id,
            issued_amount: transaction.amount,
            amount_in_words: amount_in_words(transaction.amount, self.locale),
            issued_for: profile.name,
            issued_at: transaction.timestamp,
            note: transaction.note,
            category: transaction.category,
            download_count,
            generated_at: Utc::now(),
        };

        info!(
            account_id = %actor.account_id(),
            receipt_no = %receipt.receipt_no,
            status = %status,
            download_count,
            "Receipt issued"
        );
        Ok(receipt)
    }
}
