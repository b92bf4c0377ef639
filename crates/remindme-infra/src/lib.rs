//! # RemindMe Infrastructure
//!
//! Concrete implementations of the ports defined in `remindme-core`:
//! PostgreSQL repositories via SeaORM, in-memory repositories, Argon2 password
//! hashing and random session token keys.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//!
//! Without `postgres` only the in-memory repositories are available.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, RandomTokenService};
pub use database::{
    DatabaseConfig, InMemoryAccountRepository, InMemoryReminderRepository,
    InMemorySessionTokenRepository,
};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresAccountRepository, PostgresReminderRepository, PostgresSessionTokenRepository,
};
