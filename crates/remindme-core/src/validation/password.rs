//! Password strength checks run on signup.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::{PASSWORD_FIELD, ValidationErrors};

static COMMON_PASSWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("common_passwords.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

/// Strength rules applied to new passwords.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// Similarity ratio (0.0..=1.0) at or above which a password is rejected as
    /// too close to the username.
    pub max_similarity: f64,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 9,
            max_similarity: 0.7,
        }
    }
}

impl PasswordPolicy {
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Run every rule and report all failures together under `password`.
    pub fn check(&self, password: &str, username: &str) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.too_similar(password, username) {
            errors.add(
                PASSWORD_FIELD,
                "password_too_similar",
                "The password is too similar to the username.",
            );
        }

        if password.chars().count() < self.min_length {
            let unit = if self.min_length == 1 { "character" } else { "characters" };
            errors.add(
                PASSWORD_FIELD,
                "password_too_short",
                format!(
                    "This password is too short. It must contain at least {} {unit}.",
                    self.min_length
                ),
            );
        }

        if is_common(password) {
            errors.add(
                PASSWORD_FIELD,
                "password_too_common",
                "This password is too common.",
            );
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            errors.add(
                PASSWORD_FIELD,
                "password_entirely_numeric",
                "This password is entirely numeric.",
            );
        }

        errors.into_result(())
    }

    fn too_similar(&self, password: &str, username: &str) -> bool {
        let password = password.to_lowercase();
        let username = username.to_lowercase();

        username
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|part| !part.is_empty())
            .chain(std::iter::once(username.as_str()))
            .filter(|part| !self.exceeds_length_ratio(&password, part))
            .any(|part| quick_ratio(&password, part) >= self.max_similarity)
    }

    /// A password far longer than `value` cannot be similar to it.
    fn exceeds_length_ratio(&self, password: &str, value: &str) -> bool {
        let pwd_len = password.chars().count();
        let value_len = value.chars().count();
        let bound = self.max_similarity / 2.0 * pwd_len as f64;
        pwd_len >= 10 * value_len && (value_len as f64) < bound
    }
}

fn is_common(password: &str) -> bool {
    COMMON_PASSWORDS.contains(password.trim().to_lowercase().as_str())
}

/// Upper bound on the matching-blocks ratio: `2 * M / T`, where `M` counts the
/// characters the two strings share as multisets.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }

    let matches = a
        .chars()
        .filter(|c| match available.get_mut(c) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        })
        .count();

    2.0 * matches as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(password: &str, username: &str) -> Vec<String> {
        match PasswordPolicy::default().check(password, username) {
            Ok(()) => vec![],
            Err(errors) => errors.into_iter().map(|e| e.message).collect(),
        }
    }

    #[test]
    fn test_strong_password_passes() {
        assert!(messages("usbkas389@fb", "someone").is_empty());
        assert!(messages("test-pass", "test-user").is_empty());
    }

    #[test]
    fn test_short_and_common() {
        assert_eq!(
            messages("pass", "test-user"),
            vec![
                "This password is too short. It must contain at least 9 characters.",
                "This password is too common.",
            ]
        );
    }

    #[test]
    fn test_common_is_case_insensitive() {
        assert_eq!(messages("password1", "test-user"), vec!["This password is too common."]);
        assert_eq!(messages("PassWord1", "test-user"), vec!["This password is too common."]);
    }

    #[test]
    fn test_entirely_numeric() {
        assert!(messages("830183746529", "test-user").contains(&"This password is entirely numeric.".to_string()));
        // Fractions and numeral letters are not decimal digits.
        assert!(messages("½½½½½½½½½½", "test-user").is_empty());
        assert!(messages("ⅫⅫⅫⅫⅫⅫⅫⅫⅫ", "test-user").is_empty());
    }

    #[test]
    fn test_common_list_covers_keyboard_patterns() {
        for password in ["asdfghjkl", "1q2w3e4r5t", "123qweasd", "abc123456"] {
            assert_eq!(
                messages(password, "someone"),
                vec!["This password is too common."],
                "{password}"
            );
        }
    }

    #[test]
    fn test_similar_to_username() {
        assert_eq!(
            messages("jonathan.smith1", "jonathan.smith"),
            vec!["The password is too similar to the username."]
        );
        // similarity is also checked against each part of the username
        assert_eq!(
            messages("Cornelius77", "cornelius@example.org"),
            vec!["The password is too similar to the username."]
        );
    }

    #[test]
    fn test_configurable_min_length() {
        let policy = PasswordPolicy::default().with_min_length(14);
        let errors = policy.check("usbkas389@fb", "someone").unwrap_err();
        assert_eq!(
            errors.messages(PASSWORD_FIELD),
            vec!["This password is too short. It must contain at least 14 characters."]
        );
    }

    #[test]
    fn test_quick_ratio() {
        assert_eq!(quick_ratio("abcd", "abcd"), 1.0);
        assert_eq!(quick_ratio("abcd", "wxyz"), 0.0);
        assert_eq!(quick_ratio("aab", "abb"), 2.0 * 2.0 / 6.0);
    }
}
