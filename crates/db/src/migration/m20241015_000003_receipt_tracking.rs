//! Receipt tracking: fee category and the per-transaction download counter.
//!
//! One column per statement so SQLite can apply it too.

use sea_orm_migration::prelude::*;

use super::m20241001_000002_ledger::Transactions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Transactions::Table)
                    .add_column(ColumnDef::new(ReceiptColumns::Category).string_len(64))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Transactions::Table)
                    .add_column(
                        ColumnDef::new(ReceiptColumns::DownloadCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Transactions::Table)
                    .drop_column(ReceiptColumns::DownloadCount)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Transactions::Table)
                    .drop_column(ReceiptColumns::Category)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ReceiptColumns {
    Category,
    DownloadCount,
}
