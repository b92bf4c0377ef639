//! Reminder lifecycle, scoped to the calling account.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Identity, Reminder};
use crate::error::{DomainError, RepoError};
use crate::ports::ReminderRepository;
use crate::validation;

pub struct ReminderService {
    reminders: Arc<dyn ReminderRepository>,
}

impl ReminderService {
    pub fn new(reminders: Arc<dyn ReminderRepository>) -> Self {
        Self { reminders }
    }

    /// The caller's reminders, oldest first.
    pub async fn list(&self, caller: &Identity) -> Result<Vec<Reminder>, DomainError> {
        Ok(self.reminders.find_by_owner(caller.account_id).await?)
    }

    /// Validate and store a reminder owned by the caller.
    pub async fn create(
        &self,
        caller: &Identity,
        title: Option<&str>,
        end_date_time: Option<&str>,
    ) -> Result<Reminder, DomainError> {
        let input = validation::validate_reminder(title, end_date_time, Utc::now())
            .map_err(DomainError::Validation)?;

        let reminder = Reminder::new(caller.account_id, input.title, input.end_date_time);
        let reminder = self.reminders.insert(reminder).await?;

        tracing::info!(
            account_id = %caller.account_id,
            reminder_id = %reminder.id,
            "Reminder created"
        );
        Ok(reminder)
    }

    /// Delete one of the caller's reminders.
    ///
    /// Reminders owned by someone else are reported as missing.
    pub async fn delete(&self, caller: &Identity, reminder_id: Uuid) -> Result<(), DomainError> {
        let not_found = || DomainError::NotFound {
            entity_type: "Reminder",
            id: reminder_id,
        };

        let reminder = self
            .reminders
            .find_by_id(reminder_id)
            .await?
            .ok_or_else(not_found)?;

        if reminder.owner_id != caller.account_id {
            tracing::debug!(
                account_id = %caller.account_id,
                reminder_id = %reminder_id,
                "Delete refused: reminder belongs to another account"
            );
            return Err(not_found());
        }

        match self.reminders.delete(reminder_id).await {
            Ok(()) => {
                tracing::info!(
                    account_id = %caller.account_id,
                    reminder_id = %reminder_id,
                    "Reminder deleted"
                );
                Ok(())
            }
            Err(RepoError::NotFound) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
