//! Receipt numbering.

use crate::ledger::Transaction;

/// Receipt number of a transaction: `RCP-<YYYYMM>-<id>`.
///
/// The month comes from the payment timestamp and the id is zero-padded to
/// four digits. The number depends only on the transaction, so every
/// re-issue prints the same one.
#[must_use]
pub fn receipt_number(transaction: &Transaction) -> String {
    format!(
        "RCP-{}-{:04}",
        transaction.timestamp.format("%Y%m"),
        transaction.id.into_inner()
    )
}
