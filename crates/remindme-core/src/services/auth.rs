//! Signup, login, logout and bearer-token resolution.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Account, Identity, SessionToken};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    AccountRepository, AuthError, PasswordService, SessionTokenRepository, TokenService,
};
use crate::validation::{self, PasswordPolicy, USERNAME_FIELD, USERNAME_TAKEN, ValidationErrors};

/// Account and session management.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<dyn SessionTokenRepository>,
    passwords: Arc<dyn PasswordService>,
    token_issuer: Arc<dyn TokenService>,
    policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        tokens: Arc<dyn SessionTokenRepository>,
        passwords: Arc<dyn PasswordService>,
        token_issuer: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            passwords,
            token_issuer,
            policy: PasswordPolicy::default(),
        }
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a new account.
    ///
    /// Field errors (including a taken username) come back as
    /// [`DomainError::Validation`]; strength failures as
    /// [`DomainError::WeakPassword`].
    pub async fn signup(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Account, DomainError> {
        let input = match validation::validate_signup(username, password) {
            Ok(input) => input,
            Err(mut errors) => {
                // A well-formed username is still checked for uniqueness so
                // every field error is reported at once.
                if let Some(name) = username.map(str::trim) {
                    if !errors.has_field(USERNAME_FIELD)
                        && self.accounts.find_by_username(name).await?.is_some()
                    {
                        errors.add(USERNAME_FIELD, "unique", USERNAME_TAKEN);
                    }
                }
                return Err(DomainError::Validation(errors));
            }
        };

        if self.accounts.find_by_username(input.username).await?.is_some() {
            return Err(username_taken());
        }

        self.policy
            .check(input.password, input.username)
            .map_err(DomainError::WeakPassword)?;

        let password_hash = self.passwords.hash(input.password)?;
        let account = Account::new(input.username.to_string(), password_hash);

        match self.accounts.insert(account).await {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "Account created");
                Ok(account)
            }
            Err(RepoError::Constraint(_)) => Err(username_taken()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and return the account's session token, minting one
    /// only if the account has none.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<SessionToken, DomainError> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AuthError::MissingCredentials.into()),
        };

        let Some(account) = self.accounts.find_by_username(username).await? else {
            tracing::warn!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.passwords.verify(password, &account.password_hash)? {
            tracing::warn!(account_id = %account.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.get_or_create_token(account.id).await?;
        tracing::info!(account_id = %account.id, "Login successful");
        Ok(token)
    }

    /// Revoke the caller's session token.
    pub async fn logout(&self, caller: &Identity) -> Result<(), DomainError> {
        match self.tokens.delete(caller.token.clone()).await {
            Ok(()) => {
                tracing::info!(account_id = %caller.account_id, "Logged out");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(invalid_token()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a bearer token key to the identity it belongs to.
    pub async fn authenticate(&self, key: &str) -> Result<Identity, DomainError> {
        let token = self
            .tokens
            .find_by_id(key.to_string())
            .await?
            .ok_or_else(invalid_token)?;

        let account = self
            .accounts
            .find_by_id(token.account_id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken("User inactive or deleted.".to_string()))?;

        Ok(Identity {
            account_id: account.id,
            username: account.username,
            token: token.key,
        })
    }

    /// The caller's own account record.
    pub async fn account(&self, caller: &Identity) -> Result<Account, DomainError> {
        self.accounts
            .find_by_id(caller.account_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Account",
                id: caller.account_id,
            })
    }

    async fn get_or_create_token(&self, account_id: Uuid) -> Result<SessionToken, DomainError> {
        if let Some(existing) = self.tokens.find_by_account(account_id).await? {
            return Ok(existing);
        }

        let token = SessionToken::new(self.token_issuer.issue(), account_id);
        match self.tokens.insert(token).await {
            Ok(token) => Ok(token),
            // Another login for the same account won the insert; use its token.
            Err(RepoError::Constraint(_)) => self
                .tokens
                .find_by_account(account_id)
                .await?
                .ok_or(DomainError::Repository(RepoError::NotFound)),
            Err(e) => Err(e.into()),
        }
    }
}

fn username_taken() -> DomainError {
    DomainError::Validation(ValidationErrors::single(
        USERNAME_FIELD,
        "unique",
        USERNAME_TAKEN,
    ))
}

fn invalid_token() -> DomainError {
    AuthError::InvalidToken("Invalid token.".to_string()).into()
}
