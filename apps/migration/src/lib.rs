//! Schema migrations for the RemindMe database.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_accounts;
mod m20240101_000002_create_session_tokens;
mod m20240101_000003_create_reminders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_accounts::Migration),
            Box::new(m20240101_000002_create_session_tokens::Migration),
            Box::new(m20240101_000003_create_reminders::Migration),
        ]
    }
}
