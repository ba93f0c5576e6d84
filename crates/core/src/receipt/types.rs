//! Receipt types.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use villa_shared::types::TransactionId;

/// Whether a receipt is the first one issued for its transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    /// First issuance.
    Original,
    /// Any later issuance.
    Copy,
}

impl ReceiptStatus {
    /// Status for the download count returned by the atomic increment.
    #[must_use]
    pub const fn from_download_count(count: i32) -> Self {
        if count == 1 { Self::Original } else { Self::Copy }
    }

    /// Label printed on the receipt.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "ORIGINAL",
            Self::Copy => "COPY",
        }
    }
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a receipt document needs. Layout is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// `RCP-<YYYYMM>-<id>`.
    pub receipt_no: String,
    /// ORIGINAL or COPY.
    pub status: ReceiptStatus,
    /// Source transaction.
    pub transaction_id: TransactionId,
    /// Amount paid.
    pub issued_amount: Decimal,
    /// Amount spelled out in the configured locale.
    pub amount_in_words: String,
    /// Profile name of the payer.
    pub issued_for: String,
    /// Payment timestamp.
    pub issued_at: NaiveDateTime,
    /// Note copied from the transaction.
    pub note: Option<String>,
    /// Category copied from the transaction.
    pub category: Option<String>,
    /// Download count after this issuance.
    pub download_count: i32,
    /// When this receipt was generated.
    pub generated_at: DateTime<Utc>,
}

impl Receipt {
    /// Returns true for the first issuance.
    #[must_use]
    pub fn is_original(&self) -> bool {
        self.status == ReceiptStatus::Original
    }
}
