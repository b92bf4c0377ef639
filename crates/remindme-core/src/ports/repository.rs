use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, Reminder, SessionToken};
use crate::error::RepoError;

/// Generic repository trait defining the storage operations every table supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Unique violations surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Missing rows surface as `RepoError::NotFound`.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Account repository.
#[async_trait]
pub trait AccountRepository: BaseRepository<Account, Uuid> {
    /// Find an account by exact (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError>;
}

/// Session token repository, keyed by the token key.
#[async_trait]
pub trait SessionTokenRepository: BaseRepository<SessionToken, String> {
    /// The token currently held by an account, if any.
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<SessionToken>, RepoError>;
}

/// Reminder repository.
#[async_trait]
pub trait ReminderRepository: BaseRepository<Reminder, Uuid> {
    /// Reminders owned by an account, oldest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError>;
}
