use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque bearer credential bound to exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub key: String,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn new(key: String, account_id: Uuid) -> Self {
        Self {
            key,
            account_id,
            created_at: Utc::now(),
        }
    }
}

/// The caller behind a request, resolved from its session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub username: String,
    pub token: String,
}
