use chrono::Duration;

use crate::jwt::Clock;
use crate::jwt::SigningKey;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `key` - Process-scoped signing key
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(key: &SigningKey, token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(key, token_ttl),
        }
    }

    /// Create an authenticator whose tokens are issued and checked against `clock`.
    pub fn with_clock(key: &SigningKey, token_ttl: Duration, clock: Clock) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::with_clock(key, token_ttl, clock),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `login`.
    ///
    /// # Arguments
    /// * `login` - Subject to put in the token
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored hash is unreadable)
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        login: &str,
        password: &str,
        stored_hash: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.matches(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(login)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `Expired` - Token lifetime is over
    /// * `Invalid` - Token is malformed or its signature does not verify
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.extract_subject(token)
    }

    pub fn is_token_valid(&self, token: &str) -> bool {
        self.token_service.is_valid(token)
    }

    pub fn tokens(&self) -> &TokenService {
        &self.token_service
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(&SigningKey::generate(), Duration::hours(1))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("bob", password, &hash)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let subject = authenticator
            .extract_subject(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(subject, "bob");
        assert!(authenticator.is_token_valid(&result.access_token));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("bob", "wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_with_corrupt_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("bob", "my_password", "not-a-phc-string");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let authenticator = authenticator();

        let token = authenticator
            .tokens()
            .issue_at("bob", Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(
            authenticator.extract_subject(&token),
            Err(TokenError::Expired)
        );
        assert!(!authenticator.is_token_valid(&token));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.extract_subject("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
