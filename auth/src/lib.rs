//! Authentication utilities library
//!
//! Provides the stateless authentication building blocks for the item service:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded access tokens (HS256 JWT)
//! - Authentication coordination
//!
//! The library knows nothing about HTTP or storage; services adapt it at their edges.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash));
//! assert!(!hasher.matches("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenService};
//! use chrono::Duration;
//!
//! let key = SigningKey::generate();
//! let tokens = TokenService::new(&key, Duration::hours(1));
//! let token = tokens.issue("alice").unwrap();
//! assert_eq!(tokens.extract_subject(&token).unwrap(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningKey};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(&SigningKey::generate(), Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("alice", "password123", &hash).unwrap();
//!
//! // Validate token on a later request
//! assert_eq!(auth.extract_subject(&result.access_token).unwrap(), "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::SigningKey;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
