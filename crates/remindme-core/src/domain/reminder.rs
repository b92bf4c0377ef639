use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a reminder title, in characters.
pub const REMINDER_TITLE_MAX_LEN: usize = 20;

/// Reminder entity - a titled, future-dated event owned by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub end_date_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Create a new reminder attributed to `owner_id`.
    pub fn new(owner_id: Uuid, title: String, end_date_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            end_date_time,
            created_at: Utc::now(),
        }
    }
}
