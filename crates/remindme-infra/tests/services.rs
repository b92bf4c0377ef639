//! Auth and reminder service behaviour on the in-memory repositories.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use remindme_core::domain::Identity;
use remindme_core::ports::{AuthError, PasswordService};
use remindme_core::validation::{END_DATE_TIME_FIELD, PASSWORD_FIELD, TITLE_FIELD, USERNAME_FIELD};
use remindme_core::{AuthService, DomainError, ReminderService};
use remindme_infra::{
    Argon2PasswordService, InMemoryAccountRepository, InMemoryReminderRepository,
    InMemorySessionTokenRepository, RandomTokenService,
};

struct Harness {
    auth: AuthService,
    reminders: ReminderService,
    reminder_store: Arc<InMemoryReminderRepository>,
    passwords: Arc<Argon2PasswordService>,
}

fn harness() -> Harness {
    let passwords = Arc::new(Argon2PasswordService::with_params(1024, 1, 1).unwrap());
    let reminder_store = Arc::new(InMemoryReminderRepository::new());

    Harness {
        auth: AuthService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemorySessionTokenRepository::new()),
            passwords.clone(),
            Arc::new(RandomTokenService::new()),
        ),
        reminders: ReminderService::new(reminder_store.clone()),
        reminder_store,
        passwords,
    }
}

async fn signed_in(h: &Harness, username: &str) -> Identity {
    h.auth
        .signup(Some(username), Some("usbkas389@fb"))
        .await
        .unwrap();
    let token = h
        .auth
        .login(Some(username), Some("usbkas389@fb"))
        .await
        .unwrap();
    h.auth.authenticate(&token.key).await.unwrap()
}

fn future(days: i64) -> String {
    (Utc::now() + TimeDelta::days(days)).to_rfc3339()
}

#[tokio::test]
async fn signup_hashes_password() {
    let h = harness();

    let account = h
        .auth
        .signup(Some("test-user"), Some("test-pass"))
        .await
        .unwrap();

    assert_eq!(account.username, "test-user");
    assert_ne!(account.password_hash, "test-pass");
    assert!(h.passwords.verify("test-pass", &account.password_hash).unwrap());
}

#[tokio::test]
async fn signup_rejects_duplicate_username_exactly() {
    let h = harness();
    h.auth
        .signup(Some("existing-user"), Some("usbkas389@fb"))
        .await
        .unwrap();

    let err = h
        .auth
        .signup(Some("existing-user"), Some("usbkas389@fb"))
        .await
        .unwrap_err();
    match err {
        DomainError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.messages(USERNAME_FIELD),
                vec!["A user with that username already exists."]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Different case is a different username.
    h.auth
        .signup(Some("Existing-User"), Some("usbkas389@fb"))
        .await
        .unwrap();
}

#[tokio::test]
async fn signup_reports_taken_username_with_other_field_errors() {
    let h = harness();
    h.auth
        .signup(Some("existing-user"), Some("usbkas389@fb"))
        .await
        .unwrap();

    let err = h
        .auth
        .signup(Some(" existing-user "), Some(""))
        .await
        .unwrap_err();
    match err {
        DomainError::Validation(errors) => {
            assert_eq!(
                errors.messages(USERNAME_FIELD),
                vec!["A user with that username already exists."]
            );
            assert_eq!(
                errors.messages(PASSWORD_FIELD),
                vec!["This field may not be blank."]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn signup_reports_weak_password() {
    let h = harness();

    let err = h
        .auth
        .signup(Some("test-user"), Some("password1"))
        .await
        .unwrap_err();

    match err {
        DomainError::WeakPassword(errors) => {
            assert_eq!(
                errors.messages(PASSWORD_FIELD),
                vec!["This password is too common."]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing was stored, so the username is still free.
    h.auth
        .signup(Some("test-user"), Some("usbkas389@fb"))
        .await
        .unwrap();
}

#[tokio::test]
async fn login_reuses_token_until_logout() {
    let h = harness();
    h.auth
        .signup(Some("test-user"), Some("usbkas389@fb"))
        .await
        .unwrap();

    let first = h
        .auth
        .login(Some("test-user"), Some("usbkas389@fb"))
        .await
        .unwrap();
    let second = h
        .auth
        .login(Some("test-user"), Some("usbkas389@fb"))
        .await
        .unwrap();
    assert_eq!(first.key, second.key);

    let identity = h.auth.authenticate(&first.key).await.unwrap();
    assert_eq!(identity.username, "test-user");

    h.auth.logout(&identity).await.unwrap();
    assert!(matches!(
        h.auth.authenticate(&first.key).await,
        Err(DomainError::Auth(AuthError::InvalidToken(_)))
    ));

    let third = h
        .auth
        .login(Some("test-user"), Some("usbkas389@fb"))
        .await
        .unwrap();
    assert_ne!(third.key, first.key);
}

#[tokio::test]
async fn login_failures() {
    let h = harness();
    h.auth
        .signup(Some("test-user"), Some("usbkas389@fb"))
        .await
        .unwrap();

    assert!(matches!(
        h.auth.login(None, Some("usbkas389@fb")).await,
        Err(DomainError::Auth(AuthError::MissingCredentials))
    ));
    assert!(matches!(
        h.auth.login(Some("test-user"), Some("")).await,
        Err(DomainError::Auth(AuthError::MissingCredentials))
    ));
    assert!(matches!(
        h.auth.login(Some("non-existing-user"), Some("usbkas389@fb")).await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        h.auth.login(Some("test-user"), Some("wrong-password")).await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn logout_twice_is_unauthenticated() {
    let h = harness();
    let identity = signed_in(&h, "test-user").await;

    h.auth.logout(&identity).await.unwrap();
    assert!(matches!(
        h.auth.logout(&identity).await,
        Err(DomainError::Auth(AuthError::InvalidToken(_)))
    ));
}

#[tokio::test]
async fn reminders_are_scoped_to_their_owner() {
    let h = harness();
    let alice = signed_in(&h, "alice").await;
    let bob = signed_in(&h, "bob").await;

    let created = h
        .reminders
        .create(&alice, Some("Test Title 1"), Some(&future(2)))
        .await
        .unwrap();
    h.reminders
        .create(&bob, Some("Test Title 2"), Some(&future(3)))
        .await
        .unwrap();

    let listed = h.reminders.list(&alice).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(h.reminder_store.count().await, 2);
}

#[tokio::test]
async fn list_is_empty_for_new_account() {
    let h = harness();
    let alice = signed_in(&h, "alice").await;

    assert!(h.reminders.list(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_invalid_input_without_storing() {
    let h = harness();
    let alice = signed_in(&h, "alice").await;
    let past = (Utc::now() - TimeDelta::days(4)).to_rfc3339();

    let cases = [
        (Some(""), Some(future(1)), TITLE_FIELD),
        (Some("Title"), Some("somethingwrong".to_string()), END_DATE_TIME_FIELD),
        (Some("Title"), Some(past), END_DATE_TIME_FIELD),
        (Some("Title"), None, END_DATE_TIME_FIELD),
    ];

    for (title, end, field) in cases {
        let err = h
            .reminders
            .create(&alice, title, end.as_deref())
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.has_field(field));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(h.reminder_store.count().await, 0);
}

#[tokio::test]
async fn delete_removes_own_reminder() {
    let h = harness();
    let alice = signed_in(&h, "alice").await;
    let reminder = h
        .reminders
        .create(&alice, Some("Dentist"), Some(&future(1)))
        .await
        .unwrap();

    h.reminders.delete(&alice, reminder.id).await.unwrap();

    assert_eq!(h.reminder_store.count().await, 0);
    assert!(matches!(
        h.reminders.delete(&alice, reminder.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_unknown_or_foreign_reminder_is_not_found() {
    let h = harness();
    let alice = signed_in(&h, "alice").await;
    let bob = signed_in(&h, "bob").await;
    let reminder = h
        .reminders
        .create(&alice, Some("Dentist"), Some(&future(1)))
        .await
        .unwrap();

    assert!(matches!(
        h.reminders.delete(&alice, Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        h.reminders.delete(&bob, reminder.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert_eq!(h.reminder_store.count().await, 1);
}
