//! Domain entities - the core business objects.

mod account;
mod reminder;
mod session;

pub use account::Account;
pub use reminder::{REMINDER_TITLE_MAX_LEN, Reminder};
pub use session::{Identity, SessionToken};
