//! Application services - validation plus persistence, scoped by caller.

mod auth;
mod reminder;

pub use auth::AuthService;
pub use reminder::ReminderService;
