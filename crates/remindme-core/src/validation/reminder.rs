use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use super::{REQUIRED, ValidationErrors, char_field};
use crate::domain::REMINDER_TITLE_MAX_LEN;

pub const TITLE_FIELD: &str = "reminder_title";
pub const END_DATE_TIME_FIELD: &str = "end_date_time";

const DATETIME_FORMAT_INVALID: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

/// Date and time layouts accepted once any UTC offset has been split off.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Reminder fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderInput {
    pub title: String,
    pub end_date_time: DateTime<Utc>,
}

/// Parse an ISO 8601 timestamp with optional seconds, fraction and offset
/// (`Z`, `±HH`, `±HHMM` or `±HH:MM`). Values with an offset are converted to
/// UTC; values without one are taken as UTC.
pub fn parse_date_time(value: &str) -> Option<DateTime<Utc>> {
    let (local, offset) = split_offset(value.trim())?;

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())?;

    match offset {
        None => Some(naive.and_utc()),
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Split a trailing zone designator off `value`. Returns `None` when a
/// designator is present but malformed.
fn split_offset(value: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(local) = value.strip_suffix(['Z', 'z']) {
        return Some((local, FixedOffset::east_opt(0)));
    }

    // The date itself contains '-', so only search the time-of-day part.
    let Some(time_start) = value.find(['T', ' ']) else {
        return Some((value, None));
    };
    let Some(sign_at) = value[time_start..].rfind(['+', '-']).map(|i| time_start + i) else {
        return Some((value, None));
    };

    let (local, designator) = value.split_at(sign_at);
    let sign = if designator.starts_with('-') { -1 } else { 1 };
    let body = &designator[1..];
    if !body.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match body.as_bytes() {
        [_, _] => (body, "00"),
        [_, _, b':', _, _] => (&body[..2], &body[3..]),
        [_, _, _, _] if !body.contains(':') => (&body[..2], &body[2..]),
        _ => return None,
    };

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(|offset| (local, Some(offset)))
}

/// Reject timestamps before `now`.
///
/// A past calendar date fails on the date alone; on today's date the
/// time-of-day decides. `now` itself is accepted.
pub fn validate_future_date_time(
    value: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), &'static str> {
    let (date, today) = (value.date_naive(), now.date_naive());

    if date == today && value.time() < now.time() {
        return Err("Time cannot be in the past");
    }
    if date < today {
        return Err("Date cannot be in the past");
    }
    Ok(())
}

/// Validate a reminder creation request against the current time.
pub fn validate_reminder(
    title: Option<&str>,
    end_date_time: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ReminderInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = char_field(TITLE_FIELD, title, REMINDER_TITLE_MAX_LEN, &mut errors);

    let end_date_time = match end_date_time {
        None => {
            errors.add(END_DATE_TIME_FIELD, "required", REQUIRED);
            None
        }
        Some(raw) => match parse_date_time(raw) {
            None => {
                errors.add(END_DATE_TIME_FIELD, "invalid", DATETIME_FORMAT_INVALID);
                None
            }
            Some(value) => match validate_future_date_time(value, now) {
                Ok(()) => Some(value),
                Err(message) => {
                    errors.add(END_DATE_TIME_FIELD, "invalid", message);
                    None
                }
            },
        },
    };

    match (title, end_date_time) {
        (Some(title), Some(end_date_time)) => errors.into_result(ReminderInput {
            title: title.to_string(),
            end_date_time,
        }),
        _ => Err(errors),
    }
}
