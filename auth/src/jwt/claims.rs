use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Claims carried by an access token.
///
/// Timestamps are Unix seconds, as in RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (login of the authenticated user)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at` and valid for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiration falls outside the representable time range
    pub fn for_subject(
        sub: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expiration = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!(
                "expiration overflows: {} + {}s",
                issued_at,
                ttl.num_seconds()
            ))
        })?;

        Ok(Self {
            sub: sub.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiration instant itself already counts as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::for_subject("bob", issued_at, Duration::seconds(3600)).unwrap();

        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn test_for_subject_rejects_overflowing_ttl() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let result = Claims::for_subject("bob", issued_at, Duration::seconds(10_000_000_000_000));
        assert!(matches!(result, Err(TokenError::EncodingFailed(_))));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "bob".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
