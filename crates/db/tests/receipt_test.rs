//! Integration tests for receipt issuance against the database.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use villa_core::auth::{AuthContext, UserRole};
use villa_core::ledger::{PaymentNotice, ProfileInput, TenantLedger};
use villa_core::receipt::{Locale, ReceiptEngine, ReceiptError, ReceiptStatus, ReceiptStore};
use villa_db::{LedgerRepository, ReceiptRepository};
use villa_shared::types::TransactionId;

async fn paid_transaction(db: &DatabaseConnection, owner: &AuthContext) -> TransactionId {
    let ledger = TenantLedger::new(Arc::new(LedgerRepository::new(db.clone())));
    let pid = ledger
        .upsert_profile(
            owner,
            ProfileInput {
                name: "Alice".to_string(),
                phone: String::new(),
                address: String::new(),
            },
        )
        .await
        .unwrap();

    ledger
        .record_transaction(
            owner,
            PaymentNotice {
                person_id: pid,
                amount: dec!(1500.00),
                timestamp: NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(9, 0, 0)),
                proof_path: Some("uploads/slip.png".to_string()),
                note: Some("March common fee".to_string()),
                category: Some("common-fee".to_string()),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_original_then_copy() {
    let db = common::setup_db().await;
    let alice = common::create_account(&db, "alice", UserRole::User).await;
    let tid = paid_transaction(&db, &alice).await;
    let engine = ReceiptEngine::new(Arc::new(ReceiptRepository::new(db)), Locale::Thai);

    let first = engine.issue_receipt(&alice, tid).await.unwrap();
    assert_eq!(first.status, ReceiptStatus::Original);
    assert_eq!(first.download_count, 1);
    assert_eq!(first.receipt_no, format!("RCP-202403-{:04}", tid.into_inner()));
    assert_eq!(first.amount_in_words, "หนึ่งพันห้าร้อยบาทถ้วน");
    assert_eq!(first.issued_for, "Alice");
    assert_eq!(first.issued_amount, dec!(1500.00));

    let second = engine.issue_receipt(&alice, tid).await.unwrap();
    assert_eq!(second.status, ReceiptStatus::Copy);
    assert_eq!(second.download_count, 2);
    assert_eq!(second.receipt_no, first.receipt_no);
}

#[tokio::test]
async fn test_refusals_leave_counter_untouched() {
    let db = common::setup_db().await;
    let alice = common::create_account(&db, "alice", UserRole::User).await;
    let bob = common::create_account(&db, "bob", UserRole::User).await;
    let tid = paid_transaction(&db, &alice).await;
    let repo = Arc::new(ReceiptRepository::new(db));
    let engine = ReceiptEngine::new(repo.clone(), Locale::English);

    assert!(matches!(
        engine.issue_receipt(&bob, tid).await,
        Err(ReceiptError::ProfileNotOwned(_))
    ));
    assert!(matches!(
        engine.issue_receipt(&alice, TransactionId::new(9999)).await,
        Err(ReceiptError::TransactionNotFound(_))
    ));

    let (transaction, _) = repo.find_issuance_source(tid).await.unwrap().unwrap();
    assert_eq!(transaction.download_count, 0);

    let receipt = engine.issue_receipt(&alice, tid).await.unwrap();
    assert!(receipt.is_original());
    assert_eq!(receipt.amount_in_words, "One thousand five hundred baht only");
}

#[tokio::test]
async fn test_increment_on_missing_row() {
    let db = common::setup_db().await;
    let repo = ReceiptRepository::new(db);
    assert_eq!(
        repo.increment_download_count(TransactionId::new(1))
            .await
            .unwrap(),
        None
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issuance_has_one_original() {
    let file_db = common::setup_file_db("receipt-race", 8).await;
    let db = file_db.db.clone();
    let alice = common::create_account(&db, "alice", UserRole::User).await;
    let tid = paid_transaction(&db, &alice).await;
    let engine = Arc::new(ReceiptEngine::new(
        Arc::new(ReceiptRepository::new(db)),
        Locale::Thai,
    ));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.issue_receipt(&alice, tid).await })
        })
        .collect();
    let receipts: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();
    file_db.cleanup().await;

    let mut counts: Vec<i32> = receipts.iter().map(|r| r.download_count).collect();
    counts.sort_unstable();
    assert_eq!(counts, (1..=16).collect::<Vec<_>>());
    assert_eq!(receipts.iter().filter(|r| r.is_original()).count(), 1);
}
