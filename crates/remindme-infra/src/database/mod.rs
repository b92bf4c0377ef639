//! Storage: PostgreSQL repositories via SeaORM and in-memory fallbacks.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryAccountRepository, InMemoryReminderRepository, InMemorySessionTokenRepository,
};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresAccountRepository, PostgresReminderRepository, PostgresSessionTokenRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
