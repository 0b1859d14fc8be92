//! Migration: Create the registered accounts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegisteredAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegisteredAccounts::LowercaseKey)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RegisteredAccounts::Nickname).string().not_null())
                    // NULL for passwordless accounts
                    .col(ColumnDef::new(RegisteredAccounts::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(RegisteredAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegisteredAccounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RegisteredAccounts {
    Table,
    LowercaseKey,
    Nickname,
    PasswordHash,
    CreatedAt,
}
