use super::{ValidationErrors, char_field};

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MAX_LEN: usize = 128;

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
const USERNAME_INVALID: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Signup fields that passed the field-level checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupInput<'a> {
    /// Trimmed username.
    pub username: &'a str,
    /// Password exactly as submitted.
    pub password: &'a str,
}

/// Letters, digits and `@ . + - _` only.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Field-level signup checks. Uniqueness and password strength need more
/// context and are checked by the auth service afterwards.
pub fn validate_signup<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<SignupInput<'a>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let username = char_field(USERNAME_FIELD, username, USERNAME_MAX_LEN, &mut errors);
    if let Some(name) = username {
        if !is_valid_username(name) {
            errors.add(USERNAME_FIELD, "invalid", USERNAME_INVALID);
        }
    }

    let password = char_field(PASSWORD_FIELD, password, PASSWORD_MAX_LEN, &mut errors).and(password);

    match (username, password) {
        (Some(username), Some(password)) => errors.into_result(SignupInput { username, password }),
        _ => Err(errors),
    }
}
