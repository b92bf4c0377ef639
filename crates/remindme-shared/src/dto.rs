//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional so that a missing field can be reported as a
//! validation error rather than a parse failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Session token returned on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// A bare human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Field errors keyed by field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldErrorsResponse {
    pub errors: std::collections::BTreeMap<String, Vec<String>>,
}

/// An account's public information. The password hash is never part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub date_joined: DateTime<Utc>,
}

/// Request to create a reminder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub reminder_title: Option<String>,
    pub end_date_time: Option<String>,
}

/// A reminder as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub id: Uuid,
    pub reminder_title: String,
    pub end_date_time: DateTime<Utc>,
}
