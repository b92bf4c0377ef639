//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Each table sits behind an async `RwLock` and enforces the same uniqueness
//! rules as the PostgreSQL schema. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use remindme_core::domain::{Account, Reminder, SessionToken};
use remindme_core::error::RepoError;
use remindme_core::ports::{
    AccountRepository, BaseRepository, ReminderRepository, SessionTokenRepository,
};

/// Accounts keyed by id; usernames are unique.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    store: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Account, Uuid> for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&account.id) {
            return Err(RepoError::Constraint("accounts_pkey".to_string()));
        }
        if store.values().any(|a| a.username == account.username) {
            return Err(RepoError::Constraint("accounts_username_key".to_string()));
        }

        store.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|a| a.username == username).cloned())
    }
}

/// Session tokens keyed by token key; at most one per account.
#[derive(Default)]
pub struct InMemorySessionTokenRepository {
    store: RwLock<HashMap<String, SessionToken>>,
}

impl InMemorySessionTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<SessionToken, String> for InMemorySessionTokenRepository {
    async fn find_by_id(&self, key: String) -> Result<Option<SessionToken>, RepoError> {
        Ok(self.store.read().await.get(&key).cloned())
    }

    async fn insert(&self, token: SessionToken) -> Result<SessionToken, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&token.key) {
            return Err(RepoError::Constraint("session_tokens_pkey".to_string()));
        }
        if store.values().any(|t| t.account_id == token.account_id) {
            return Err(RepoError::Constraint(
                "session_tokens_account_id_key".to_string(),
            ));
        }

        store.insert(token.key.clone(), token.clone());
        Ok(token)
    }

    async fn delete(&self, key: String) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&key)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl SessionTokenRepository for InMemorySessionTokenRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<SessionToken>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|t| t.account_id == account_id).cloned())
    }
}

/// Reminders kept in insertion order.
#[derive(Default)]
pub struct InMemoryReminderRepository {
    store: RwLock<Vec<Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored reminders, across all owners.
    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl BaseRepository<Reminder, Uuid> for InMemoryReminderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, reminder: Reminder) -> Result<Reminder, RepoError> {
        let mut store = self.store.write().await;

        if store.iter().any(|r| r.id == reminder.id) {
            return Err(RepoError::Constraint("reminders_pkey".to_string()));
        }

        store.push(reminder.clone());
        Ok(reminder)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let position = store
            .iter()
            .position(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;

        store.remove(position);
        Ok(())
    }
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    #[tokio::test]
    async fn test_username_is_unique_and_case_sensitive() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(Account::new("alice".into(), "hash".into()))
            .await
            .unwrap();

        let duplicate = repo
            .insert(Account::new("alice".into(), "hash".into()))
            .await;
        assert!(matches!(duplicate, Err(RepoError::Constraint(_))));

        repo.insert(Account::new("Alice".into(), "hash".into()))
            .await
            .unwrap();
        assert!(repo.find_by_username("ALICE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_one_token_per_account() {
        let repo = InMemorySessionTokenRepository::new();
        let account_id = Uuid::new_v4();

        repo.insert(SessionToken::new("a".into(), account_id))
            .await
            .unwrap();
        let second = repo.insert(SessionToken::new("b".into(), account_id)).await;
        assert!(matches!(second, Err(RepoError::Constraint(_))));

        assert_eq!(
            repo.find_by_account(account_id).await.unwrap().unwrap().key,
            "a"
        );
        repo.delete("a".into()).await.unwrap();
        assert!(matches!(
            repo.delete("a".into()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_reminders_listed_in_insertion_order_per_owner() {
        let repo = InMemoryReminderRepository::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let later = Utc::now() + TimeDelta::days(1);

        let first = repo
            .insert(Reminder::new(alice, "first".into(), later))
            .await
            .unwrap();
        repo.insert(Reminder::new(bob, "other".into(), later))
            .await
            .unwrap();
        let second = repo
            .insert(Reminder::new(alice, "second".into(), later))
            .await
            .unwrap();

        let listed = repo.find_by_owner(alice).await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert_eq!(repo.count().await, 3);
    }
}
