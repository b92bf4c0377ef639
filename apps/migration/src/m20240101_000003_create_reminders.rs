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
                    .table(Reminders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reminders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reminders::AccountId).uuid().not_null())
                    .col(
                        ColumnDef::new(Reminders::ReminderTitle)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reminders::EndDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reminders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_account")
                            .from(Reminders::Table, Reminders::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminders_account_created")
                    .table(Reminders::Table)
                    .col(Reminders::AccountId)
                    .col(Reminders::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reminders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reminders {
    Table,
    Id,
    AccountId,
    ReminderTitle,
    EndDateTime,
    CreatedAt,
}
