use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::Login;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), UserError> {
        if self
            .repository
            .find_by_login(&command.login)
            .await?
            .is_some()
        {
            tracing::warn!(login = %command.login, "Registration rejected: login taken");
            return Err(UserError::LoginTaken(command.login.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Password(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            login: command.login,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            login = %created_user.login,
            "User registered"
        );

        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let login = Login::new(command.login).map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_login(&login)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(user.login.as_str(), &command.password, &user.password_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => UserError::Password(err.to_string()),
                AuthenticationError::TokenError(err) => UserError::Token(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, login = %user.login, "User logged in");

        Ok(result.access_token)
    }

    async fn find_identity(&self, login: &str) -> Result<User, UserError> {
        let parsed = Login::new(login.to_string())
            .map_err(|_| UserError::NotFound(login.to_string()))?;

        self.repository
            .find_by_login(&parsed)
            .await?
            .ok_or(UserError::NotFound(login.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::SigningKey;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Password;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            &SigningKey::generate(),
            Duration::hours(1),
        ))
    }

    fn stored_user(authenticator: &Authenticator, login: &str, password: &str) -> User {
        User {
            id: UserId::new(),
            login: Login::new(login.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn register_command(login: &str, password: &str) -> RegisterCommand {
        RegisterCommand::new(
            Login::new(login.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.login.as_str() == "bob"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "password123"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .register(register_command("bob", "password123"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_login_taken() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "bob", "password123");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service
            .register(register_command("bob", "another-password"))
            .await;
        assert!(matches!(result, Err(UserError::LoginTaken(login)) if login == "bob"));
    }

    #[tokio::test]
    async fn test_register_race_reported_by_store() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::LoginTaken(user.login.to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .register(register_command("bob", "password123"))
            .await;
        assert!(matches!(result, Err(UserError::LoginTaken(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_login() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "bob", "password123");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .withf(|login| login.as_str() == "bob")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service
            .login(LoginCommand {
                login: "bob".to_string(),
                password: "password123".to_string(),
            })
            .await
            .expect("Login failed");

        assert_eq!(authenticator.extract_subject(&token), Ok("bob".to_string()));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "bob", "password123");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service
            .login(LoginCommand {
                login: "bob".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_indistinguishable() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(LoginCommand {
                login: "ghost".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_with_unparseable_login_skips_lookup() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_login().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(LoginCommand {
                login: "no spaces allowed".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_propagates_database_error() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(LoginCommand {
                login: "bob".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_find_identity() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "bob", "password123");
        let expected_id = existing.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let user = service.find_identity("bob").await.expect("Lookup failed");
        assert_eq!(user.id, expected_id);
        assert_eq!(user.login.as_str(), "bob");
    }

    #[tokio::test]
    async fn test_find_identity_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.find_identity("ghost").await;
        assert!(matches!(result, Err(UserError::NotFound(login)) if login == "ghost"));
    }
}
