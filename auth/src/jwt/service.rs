use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::key::SigningKey;

/// Source of the current time for token issuance and validation.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Issues and validates signed access tokens.
///
/// Tokens are HS256 JWS compact strings. Expiry is checked here against an explicit
/// clock reading rather than inside `jsonwebtoken`, with no leeway, so the boundary
/// is exact to the second.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Clock,
}

impl TokenService {
    /// Default lifetime of an issued token.
    pub const DEFAULT_TTL_SECONDS: i64 = 3600;

    /// Create a token service signing with `key`.
    ///
    /// # Arguments
    /// * `key` - Process-scoped signing key
    /// * `ttl` - Lifetime of every issued token
    pub fn new(key: &SigningKey, ttl: Duration) -> Self {
        Self::with_clock(key, ttl, Arc::new(Utc::now))
    }

    /// Create a token service that reads the current time from `clock`.
    pub fn with_clock(key: &SigningKey, ttl: Duration, clock: Clock) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `login`, valid from now for the configured TTL.
    pub fn issue(&self, login: &str) -> Result<String, TokenError> {
        self.issue_at(login, (self.clock)())
    }

    /// Issue a token for `login` as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration out of range, or serialization or signing failed
    pub fn issue_at(&self, login: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_subject(login, now, self.ttl)?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify `token` and return its subject.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.extract_subject_at(token, (self.clock)())
    }

    /// Verify `token` against the clock reading `now` and return its subject.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token, bad signature, or missing claims
    /// * `Expired` - `now` is at or past the token's expiration
    pub fn extract_subject_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = self.verify_signature(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }

    /// Boolean form of [`TokenService::extract_subject`].
    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(token, (self.clock)())
    }

    pub fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.extract_subject_at(token, now).is_ok()
    }

    fn verify_signature(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
