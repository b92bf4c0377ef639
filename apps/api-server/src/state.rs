//! Application state - shared across all handlers.

use std::sync::Arc;

use remindme_core::ports::{
    AccountRepository, PasswordService, ReminderRepository, SessionTokenRepository,
};
use remindme_core::validation::PasswordPolicy;
use remindme_core::{AuthService, ReminderService};
use remindme_infra::{
    Argon2PasswordService, DatabaseConfig, InMemoryAccountRepository,
    InMemoryReminderRepository, InMemorySessionTokenRepository, RandomTokenService,
};

use crate::config::AppConfig;

/// Where accounts, tokens and reminders are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub reminders: Arc<ReminderService>,
    pub storage: StorageBackend,
}

struct Repositories {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<dyn SessionTokenRepository>,
    reminders: Arc<dyn ReminderRepository>,
    storage: StorageBackend,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            tokens: Arc::new(InMemorySessionTokenRepository::new()),
            reminders: Arc::new(InMemoryReminderRepository::new()),
            storage: StorageBackend::Memory,
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect(db_config: Option<&DatabaseConfig>) -> Self {
        use remindme_infra::{
            PostgresAccountRepository, PostgresReminderRepository, PostgresSessionTokenRepository,
            database,
        };

        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match database::connect(config).await {
            Ok(conn) => Self {
                accounts: Arc::new(PostgresAccountRepository::new(conn.clone())),
                tokens: Arc::new(PostgresSessionTokenRepository::new(conn.clone())),
                reminders: Arc::new(PostgresReminderRepository::new(conn)),
                storage: StorageBackend::Postgres,
            },
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_db_config: Option<&DatabaseConfig>) -> Self {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }
}

impl AppState {
    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> Self {
        let repositories = Repositories::connect(config.database.as_ref()).await;
        let state = Self::assemble(
            repositories,
            Arc::new(Argon2PasswordService::new()),
            config.password_policy.clone(),
        );

        tracing::info!(storage = state.storage.as_str(), "Application state initialized");
        state
    }

    /// State backed entirely by in-memory repositories.
    #[cfg(test)]
    pub fn in_memory(passwords: Arc<dyn PasswordService>, policy: PasswordPolicy) -> Self {
        Self::assemble(Repositories::in_memory(), passwords, policy)
    }

    fn assemble(
        repositories: Repositories,
        passwords: Arc<dyn PasswordService>,
        policy: PasswordPolicy,
    ) -> Self {
        let auth = AuthService::new(
            repositories.accounts,
            repositories.tokens,
            passwords,
            Arc::new(RandomTokenService::new()),
        )
        .with_password_policy(policy);

        Self {
            auth: Arc::new(auth),
            reminders: Arc::new(ReminderService::new(repositories.reminders)),
            storage: repositories.storage,
        }
    }
}
