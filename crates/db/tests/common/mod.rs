//! Shared setup for repository integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use villa_core::auth::{AccountStore, AuthContext, NewAccount, UserRole};
use villa_db::AccountRepository;
use villa_db::migration::Migrator;

/// Fresh in-memory SQLite database with every migration applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");
    db
}

/// File-backed SQLite database served by a pool of `connections`, so
/// concurrent callers really race each other.
///
/// The file lives in the system temp directory; remove it with
/// [`FileDb::cleanup`].
pub struct FileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl FileDb {
    pub async fn cleanup(self) {
        let _ = self.db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn setup_file_db(name: &str, connections: u32) -> FileDb {
    let path = std::env::temp_dir().join(format!(
        "villa-{name}-{}-{}.db",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options
        .max_connections(connections)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open file database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");
    FileDb { db, path }
}

/// Inserts an account directly and returns its context.
pub async fn create_account(
    db: &DatabaseConnection,
    username: &str,
    role: UserRole,
) -> AuthContext {
    let account = AccountRepository::new(db.clone())
        .insert_account(NewAccount {
            username: username.to_string(),
            password_hash: format!("$argon2id$test-{}", Utc::now().timestamp_micros()),
            role,
            recovery_question: "pet?".to_string(),
            recovery_answer_hash: "$argon2id$test".to_string(),
        })
        .await
        .expect("Failed to create test account");

    AuthContext::new(account.id, account.role)
}
