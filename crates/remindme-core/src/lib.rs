//! # RemindMe Core
//!
//! The domain layer of the RemindMe API.
//! Accounts, session tokens and reminders, the validators that guard them, and
//! the services that tie validation to the storage ports. No infrastructure
//! dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
pub use services::{AuthService, ReminderService};
pub use validation::{FieldError, ValidationErrors};
