//! Opaque session token keys.

use argon2::password_hash::rand_core::{OsRng, RngCore};

use remindme_core::ports::TokenService;

/// Number of random bytes behind each key (40 hex characters).
const TOKEN_BYTES: usize = 20;

/// Issues hex-encoded keys drawn from the operating system RNG.
#[derive(Debug, Default)]
pub struct RandomTokenService;

impl RandomTokenService {
    pub fn new() -> Self {
        Self
    }
}

impl TokenService for RandomTokenService {
    fn issue(&self) -> String {
        let mut buffer = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut buffer);
        hex::encode(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let token = RandomTokenService::new().issue();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let service = RandomTokenService::new();
        let tokens: HashSet<String> = (0..100).map(|_| service.issue()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
