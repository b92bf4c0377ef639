//! SeaORM entities and their conversions to and from domain types.

pub mod account;
pub mod reminder;
pub mod session_token;
