//! Personnel and transactions tables.
//!
//! One profile per account (unique owner); transactions hang off a profile.

use sea_orm_migration::prelude::*;

use super::m20241001_000001_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Personnel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Personnel::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Personnel::OwnerAccountId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Personnel::Name).string().not_null().default(""))
                    .col(ColumnDef::new(Personnel::Phone).string().not_null().default(""))
                    .col(ColumnDef::new(Personnel::Address).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Personnel::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Personnel::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personnel_owner")
                            .from(Personnel::Table, Personnel::OwnerAccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::PersonId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Transactions::AmountMinor).gte(0)),
                    )
                    .col(ColumnDef::new(Transactions::Timestamp).timestamp().not_null())
                    .col(ColumnDef::new(Transactions::ProofPath).text())
                    .col(ColumnDef::new(Transactions::Note).text())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_person")
                            .from(Transactions::Table, Transactions::PersonId)
                            .to(Personnel::Table, Personnel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_person_time")
                    .table(Transactions::Table)
                    .col(Transactions::PersonId)
                    .col(Transactions::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Personnel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Personnel {
    Table,
    Id,
    OwnerAccountId,
    Name,
    Phone,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Transactions {
    Table,
    Id,
    PersonId,
    AmountMinor,
    Timestamp,
    ProofPath,
    Note,
    CreatedAt,
}
