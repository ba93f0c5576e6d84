//! Domain types for resident profiles and payment transactions.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use villa_shared::types::{AccountId, ProfileId, TransactionId};

/// A resident profile. Each account owns at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personnel {
    /// Profile ID.
    pub id: ProfileId,
    /// Owning account.
    pub owner: AccountId,
    /// Display name, printed on receipts.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// House or unit address.
    pub address: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Editable profile fields. Empty strings are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileInput {
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// House or unit address.
    pub address: String,
}

/// A payment notice filed by a resident.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentNotice {
    /// Profile the payment is for.
    pub person_id: ProfileId,
    /// Amount paid; non-negative with at most two decimal places.
    pub amount: Decimal,
    /// When the payment was made. Defaults to the current local time.
    pub timestamp: Option<NaiveDateTime>,
    /// Opaque reference to the uploaded proof of transfer.
    pub proof_path: Option<String>,
    /// Free-text note.
    pub note: Option<String>,
    /// Fee category (common fee, water, ...).
    pub category: Option<String>,
}

/// A validated transaction ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Profile the payment is for.
    pub person_id: ProfileId,
    /// Amount paid.
    pub amount: Decimal,
    /// When the payment was made.
    pub timestamp: NaiveDateTime,
    /// Proof of transfer reference.
    pub proof_path: Option<String>,
    /// Free-text note.
    pub note: Option<String>,
    /// Fee category.
    pub category: Option<String>,
}

/// A recorded payment.
///
/// Immutable once inserted, apart from `download_count` which only the
/// receipt engine moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Profile the payment is for.
    pub person_id: ProfileId,
    /// Amount paid.
    pub amount: Decimal,
    /// When the payment was made.
    pub timestamp: NaiveDateTime,
    /// Proof of transfer reference.
    pub proof_path: Option<String>,
    /// Free-text note.
    pub note: Option<String>,
    /// Fee category.
    pub category: Option<String>,
    /// Number of receipts issued so far.
    pub download_count: i32,
    /// Insert time.
    pub created_at: DateTime<Utc>,
}

/// Transactions of one profile together with their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentStatement {
    /// The profile the statement covers.
    pub profile: Personnel,
    /// Its transactions, newest first.
    pub transactions: Vec<Transaction>,
    /// Exact sum of the listed amounts.
    pub total: Decimal,
    /// When the statement was produced.
    pub generated_at: DateTime<Utc>,
}

impl PaymentStatement {
    /// Builds a statement, summing the amounts.
    #[must_use]
    pub fn new(profile: Personnel, transactions: Vec<Transaction>) -> Self {
        let total = transactions.iter().map(|t| t.amount).sum();
        Self {
            profile,
            transactions,
            total,
            generated_at: Utc::now(),
        }
    }

    /// Number of payments on the statement.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if the profile has no payments yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Newest first, ties broken by id descending.
pub(crate) fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id))
}
