use async_trait::async_trait;

use crate::domain::user::models::Login;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated login and password
    ///
    /// # Errors
    /// * `LoginTaken` - A user with this login already exists
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(), UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Returns
    /// Signed access token for the user's login
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown login or wrong password (indistinguishable)
    /// * `Token` - Token generation failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Resolve the identity behind a token subject.
    ///
    /// # Errors
    /// * `NotFound` - No user with this login
    /// * `DatabaseError` - Database operation failed
    async fn find_identity(&self, login: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Implementations enforce login uniqueness themselves; the service's
    /// pre-check is only a fast path.
    ///
    /// # Errors
    /// * `LoginTaken` - Login is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by login.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError>;
}
