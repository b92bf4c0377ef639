use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use remindme_core::domain::{Account, Reminder};
use remindme_core::error::RepoError;
use remindme_core::ports::{AccountRepository, BaseRepository, ReminderRepository};

use crate::database::entity::{account, reminder};
use crate::database::postgres_repo::{PostgresAccountRepository, PostgresReminderRepository};

fn reminder_model(id: Uuid, owner: Uuid, title: &str) -> reminder::Model {
    let now = Utc::now();
    reminder::Model {
        id,
        account_id: owner,
        reminder_title: title.to_owned(),
        end_date_time: (now + TimeDelta::days(2)).into(),
        created_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_reminder_by_id() {
    let reminder_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![reminder_model(reminder_id, owner, "Test Title 1")]])
        .into_connection();

    let repo = PostgresReminderRepository::new(db);

    let result: Option<Reminder> = repo.find_by_id(reminder_id).await.unwrap();

    let reminder = result.unwrap();
    assert_eq!(reminder.title, "Test Title 1");
    assert_eq!(reminder.id, reminder_id);
    assert_eq!(reminder.owner_id, owner);
}

#[tokio::test]
async fn test_find_reminders_by_owner() {
    let owner = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            reminder_model(Uuid::new_v4(), owner, "first"),
            reminder_model(Uuid::new_v4(), owner, "second"),
        ]])
        .into_connection();

    let repo = PostgresReminderRepository::new(db);
    let titles: Vec<String> = repo
        .find_by_owner(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();

    assert_eq!(titles, vec!["first", "second"]);
}

#[tokio::test]
async fn test_insert_account_returns_stored_row() {
    let account = Account::new("test-user".to_owned(), "$argon2id$hash".to_owned());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![account::Model {
            id: account.id,
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            created_at: account.created_at.into(),
        }]])
        .into_connection();

    let repo = PostgresAccountRepository::new(db);
    let stored = repo.insert(account.clone()).await.unwrap();

    assert_eq!(stored.id, account.id);
    assert_eq!(stored.username, "test-user");
}

#[tokio::test]
async fn test_find_account_by_username_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<account::Model>::new()])
        .into_connection();

    let repo = PostgresAccountRepository::new(db);
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_reminder_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresReminderRepository::new(db);
    let result = BaseRepository::<Reminder, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
