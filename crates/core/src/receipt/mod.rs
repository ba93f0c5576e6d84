//! Receipt issuance.
//!
//! Receipt numbers are a pure function of the transaction. Whether a receipt
//! is the ORIGINAL or a COPY is decided by the value the store returns from
//! its atomic download-count increment, never by an earlier read.

pub mod error;
pub mod number;
pub mod service;
pub mod store;
pub mod types;
pub mod words;

#[cfg(test)]
mod props;

pub use error::ReceiptError;
pub use number::receipt_number;
pub use service::ReceiptEngine;
pub use store::ReceiptStore;
pub use types::{Receipt, ReceiptStatus};
pub use words::{Locale, UnsupportedLocale, amount_in_words};
