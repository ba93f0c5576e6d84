//! Database bootstrap for Villa Ledger.
//!
//! Applies pending migrations, then creates the `admin` account from the
//! `bootstrap` configuration section if it does not exist yet. Safe to run on
//! every deploy.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use villa_core::auth::{
    AccountStore, BOOTSTRAP_ADMIN_USERNAME, CredentialStore, RegisterAccount, UserRole,
};
use villa_core::receipt::Locale;
use villa_db::migration::Migrator;
use villa_db::{AccountRepository, connect};
use villa_shared::config::BootstrapConfig;
use villa_shared::{AppConfig, ResetTokenService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "villa=debug,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let locale = Locale::try_from(&config.receipt).context("Invalid receipt configuration")?;
    info!(?locale, "Receipt locale");

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("Failed to apply migrations")?;
    info!("Migrations applied");

    let accounts = Arc::new(AccountRepository::new(db));
    let credentials = CredentialStore::new(
        accounts.clone(),
        ResetTokenService::from_config(&config.recovery),
    );

    seed_admin(&credentials, accounts.as_ref(), &config.bootstrap).await?;

    info!("Seeding complete");
    Ok(())
}

/// Creates the `admin` account unless it already exists.
async fn seed_admin(
    credentials: &CredentialStore<AccountRepository>,
    accounts: &AccountRepository,
    bootstrap: &BootstrapConfig,
) -> anyhow::Result<()> {
    let Some(password) = bootstrap.admin_password.as_deref() else {
        warn!("bootstrap.admin_password not set, skipping administrator bootstrap");
        return Ok(());
    };

    if accounts
        .find_account_by_username(BOOTSTRAP_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        info!("Administrator already exists, skipping");
        return Ok(());
    }

    if bootstrap.recovery_answer.trim().is_empty() {
        warn!(
            "bootstrap.recovery_answer is empty; password recovery for admin will accept an empty answer"
        );
    }

    let id = credentials
        .register(RegisterAccount {
            username: BOOTSTRAP_ADMIN_USERNAME.to_string(),
            password: password.to_string(),
            role_hint: Some(UserRole::Admin),
            recovery_question: bootstrap.recovery_question.clone(),
            recovery_answer: bootstrap.recovery_answer.clone(),
        })
        .await?;

    info!(account_id = %id, "Administrator account created");
    Ok(())
}
