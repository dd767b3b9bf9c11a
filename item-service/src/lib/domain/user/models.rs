use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::LoginError;
use crate::user::errors::PasswordPolicyError;

/// User aggregate entity.
///
/// Plain record owned by the user store. Request handling never sees it directly;
/// the HTTP layer converts it into a principal.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub login: Login,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login value type
///
/// Unique and immutable once a user is created. 3-32 characters of alphanumerics,
/// underscore, hyphen, or dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `TooShort` - Login shorter than 3 characters
    /// * `TooLong` - Login longer than 32 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumerics, `_`, `-`, `.`
    pub fn new(login: String) -> Result<Self, LoginError> {
        let login = Self::with_valid_length(login)?;
        let login = Self::with_valid_chars(login)?;
        Ok(Self(login))
    }

    fn with_valid_length(login: String) -> Result<String, LoginError> {
        let length = login.chars().count();
        if length < Self::MIN_LENGTH {
            Err(LoginError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(login)
        }
    }

    fn with_valid_chars(login: String) -> Result<String, LoginError> {
        if login
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            Ok(login)
        } else {
            Err(LoginError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub login: Login,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(login: Login, password: Password) -> Self {
        Self { login, password }
    }
}

/// Command to log in with raw credentials.
///
/// Left unvalidated on purpose: a login that could never have been registered
/// must fail exactly like a wrong password.
pub struct LoginCommand {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
