//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use remindme_core::domain::{Account, Reminder, SessionToken};
use remindme_core::error::RepoError;
use remindme_core::ports::{AccountRepository, ReminderRepository, SessionTokenRepository};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::reminder::{self, Entity as ReminderEntity};
use super::entity::session_token::{self, Entity as SessionTokenEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL account repository.
pub type PostgresAccountRepository = PostgresBaseRepository<AccountEntity>;

/// PostgreSQL session token repository.
pub type PostgresSessionTokenRepository = PostgresBaseRepository<SessionTokenEntity>;

/// PostgreSQL reminder repository.
pub type PostgresReminderRepository = PostgresBaseRepository<ReminderEntity>;

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        tracing::debug!(username, "Finding account by username");

        let result = AccountEntity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl SessionTokenRepository for PostgresSessionTokenRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<SessionToken>, RepoError> {
        let result = SessionTokenEntity::find()
            .filter(session_token::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ReminderRepository for PostgresReminderRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError> {
        tracing::debug!(account_id = %owner_id, "Listing reminders");

        let result = ReminderEntity::find()
            .filter(reminder::Column::AccountId.eq(owner_id))
            .order_by_asc(reminder::Column::CreatedAt)
            .order_by_asc(reminder::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
