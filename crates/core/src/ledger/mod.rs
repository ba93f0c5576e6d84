//! Per-owner resident ledger.
//!
//! This module implements the tenant ledger:
//! - Resident profiles (one per account)
//! - Payment notices and their listing
//! - Payment statements with totals
//! - The store trait the ledger persists through
//!
//! Tenant isolation: for every transaction the only resident allowed to see it
//! is the owner of its profile. Administrators read everything.

pub mod error;
pub mod service;
pub mod store;
pub mod types;


pub use error::LedgerError;
pub use service::TenantLedger;
pub use store::LedgerStore;
pub use types::{
    NewTransaction, PaymentNotice, PaymentStatement, Personnel, ProfileInput, Transaction,
};
