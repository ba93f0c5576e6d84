//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The list is append-only;
//! each step is applied once and recorded in `seaql_migrations`.

pub use sea_orm_migration::prelude::*;

mod m20241001_000001_accounts;
mod m20241001_000002_ledger;
mod m20241015_000003_receipt_tracking;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_accounts::Migration),
            Box::new(m20241001_000002_ledger::Migration),
            Box::new(m20241015_000003_receipt_tracking::Migration),
        ]
    }
}
