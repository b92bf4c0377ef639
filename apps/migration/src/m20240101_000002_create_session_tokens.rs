use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SessionTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SessionTokens::Key)
                            .string_len(40)
                            .not_null()
                            .primary_key(),
                    )
                    // One live token per account.
                    .col(
                        ColumnDef::new(SessionTokens::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SessionTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_tokens_account")
                            .from(SessionTokens::Table, SessionTokens::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SessionTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SessionTokens {
    Table,
    Key,
    AccountId,
    CreatedAt,
}
