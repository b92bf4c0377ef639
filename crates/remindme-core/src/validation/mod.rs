//! Field validators.
//!
//! Each validator inspects one field and records failures into a
//! [`ValidationErrors`] list; object-level validators compose them so a single
//! request reports every bad field at once.

mod account;
mod password;
mod reminder;

use std::fmt;

pub use account::{
    PASSWORD_FIELD, PASSWORD_MAX_LEN, SignupInput, USERNAME_FIELD, USERNAME_MAX_LEN,
    USERNAME_TAKEN, is_valid_username, validate_signup,
};
pub use password::PasswordPolicy;
pub use reminder::{
    END_DATE_TIME_FIELD, ReminderInput, TITLE_FIELD, parse_date_time, validate_future_date_time,
    validate_reminder,
};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";

/// A single failed check on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    /// Machine-readable reason (`required`, `blank`, `max_length`, `invalid`, `unique`, ...).
    pub code: &'static str,
    pub message: String,
}

/// Ordered collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a list holding one error.
    pub fn single(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, code, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            code,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Messages recorded against `field`, in insertion order.
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// `Ok(value)` when nothing was recorded, otherwise the errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Shared text-field checks: presence, non-blank after trimming, and length.
///
/// Returns the trimmed value when it is present and non-blank, even if it is
/// too long, so callers can keep checking the remaining rules.
pub(crate) fn char_field<'a>(
    field: &'static str,
    value: Option<&'a str>,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let Some(raw) = value else {
        errors.add(field, "required", REQUIRED);
        return None;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.add(field, "blank", BLANK);
        return None;
    }

    if trimmed.chars().count() > max_len {
        errors.add(
            field,
            "max_length",
            format!("Ensure this field has no more than {max_len} characters."),
        );
    }

    Some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_field_required_and_blank() {
        let mut errors = ValidationErrors::new();
        assert_eq!(char_field("a", None, 5, &mut errors), None);
        assert_eq!(char_field("b", Some("   "), 5, &mut errors), None);

        assert_eq!(errors.messages("a"), vec![REQUIRED]);
        assert_eq!(errors.messages("b"), vec![BLANK]);
    }

    #[test]
    fn test_char_field_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        assert_eq!(char_field("t", Some(" héllo "), 5, &mut errors), Some("héllo"));
        assert!(errors.is_empty());

        char_field("t", Some("héllos"), 5, &mut errors);
        assert_eq!(
            errors.messages("t"),
            vec!["Ensure this field has no more than 5 characters."]
        );
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::single("username", "blank", BLANK);
        errors.add("password", "required", REQUIRED);

        assert_eq!(
            errors.to_string(),
            "username: This field may not be blank.; password: This field is required."
        );
    }
}
