//! Reminder handlers. Every route requires a session.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use remindme_core::domain::Reminder;
use remindme_shared::dto::{CreateReminderRequest, ReminderResponse};

use super::parse_body;
use crate::middleware::auth::Caller;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn reminder_response(reminder: Reminder) -> ReminderResponse {
    ReminderResponse {
        id: reminder.id,
        reminder_title: reminder.title,
        end_date_time: reminder.end_date_time,
    }
}

/// GET /reminders
pub async fn list(state: web::Data<AppState>, caller: Caller) -> AppResult<HttpResponse> {
    let reminders = state.reminders.list(&caller).await?;

    let body: Vec<ReminderResponse> = reminders.into_iter().map(reminder_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /reminders
pub async fn create(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let req: CreateReminderRequest = parse_body(&body)?;

    let reminder = state
        .reminders
        .create(
            &caller,
            req.reminder_title.as_deref(),
            req.end_date_time.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(reminder_response(reminder)))
}

/// DELETE /reminders/{id}
pub async fn delete(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.reminders.delete(&caller, path.into_inner()).await?;

    Ok(HttpResponse::Accepted().finish())
}
