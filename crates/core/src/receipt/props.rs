//! Property-based tests for receipt numbering and formatting.
//!
//! - Receipt numbers depend only on the transaction
//! - The download counter only moves up, one step per issuance
//! - Amount-in-words formatting is total over valid amounts

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use villa_shared::types::{AccountId, ProfileId, TransactionId};

use super::number::receipt_number;
use super::types::ReceiptStatus;
use super::words::{Locale, amount_in_words};
use super::ReceiptEngine;
use crate::auth::{AuthContext, UserRole};
use crate::ledger::{PaymentNotice, ProfileInput, TenantLedger, Transaction};
use crate::memory::MemoryStore;

/// Strategy for valid amounts (0.00 to 99,999,999.99).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

fn transaction(id: i64, year: i32, month: u32, download_count: i32) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        person_id: ProfileId::new(1),
        amount: Decimal::ONE,
        timestamp: NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        proof_path: None,
        note: None,
        category: None,
        download_count,
        created_at: Utc::now(),
    }
}

proptest! {
    /// Re-issuing never changes the number, whatever the counter says.
    #[test]
    fn prop_receipt_number_is_stable(
        id in 1i64..100_000,
        year in 2000i32..2100,
        month in 1u32..=12,
        count_a in 0i32..1000,
        count_b in 0i32..1000,
    ) {
        let a = receipt_number(&transaction(id, year, month, count_a));
        let b = receipt_number(&transaction(id, year, month, count_b));
        prop_assert_eq!(&a, &b);
        let expected_prefix = format!("RCP-{year:04}{month:02}-");
        prop_assert!(a.starts_with(&expected_prefix));
        prop_assert!(a.ends_with(&id.to_string()));
    }

    /// Every valid amount spells out to a non-empty phrase in both locales.
    #[test]
    fn prop_amount_in_words_is_total(amount in amount()) {
        let thai = amount_in_words(amount, Locale::Thai);
        let english = amount_in_words(amount, Locale::English);

        prop_assert!(thai.contains("บาท") || thai.ends_with("สตางค์"));
        prop_assert!(english.contains("baht") || english.ends_with("satang"));
        prop_assert_eq!(thai.ends_with("ถ้วน"), amount.fract().is_zero());
    }

    /// Status is ORIGINAL for exactly one count.
    #[test]
    fn prop_status_original_only_at_one(count in 0i32..10_000) {
        let status = ReceiptStatus::from_download_count(count);
        prop_assert_eq!(status == ReceiptStatus::Original, count == 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Sequential issuance walks the counter 1, 2, 3, ... with a single ORIGINAL.
    #[test]
    fn prop_counter_is_monotonic(issues in 1usize..12) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let counts: Vec<(i32, ReceiptStatus)> = runtime.block_on(async {
            let store = Arc::new(MemoryStore::new());
            let ledger = TenantLedger::new(store.clone());
            let engine = ReceiptEngine::new(store, Locale::Thai);
            let actor = AuthContext::new(AccountId::new(1), UserRole::User);

            let pid = ledger
                .upsert_profile(&actor, ProfileInput::default())
                .await
                .unwrap();
            let tid = ledger
                .record_transaction(
                    &actor,
                    PaymentNotice {
                        person_id: pid,
                        amount: Decimal::ONE_HUNDRED,
                        timestamp: None,
                        proof_path: None,
                        note: None,
                        category: None,
                    },
                )
                .await
                .unwrap();

            let mut out = Vec::new();
            for _ in 0..issues {
                let receipt = engine.issue_receipt(&actor, tid).await.unwrap();
                out.push((receipt.download_count, receipt.status));
            }
            out
        });

        for (i, (count, status)) in counts.iter().enumerate() {
            prop_assert_eq!(*count, i32::try_from(i + 1).unwrap());
            prop_assert_eq!(*status == ReceiptStatus::Original, i == 0);
        }
    }
}
