use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::models::Login;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::LoginError;
use crate::user::errors::PasswordPolicyError;

pub async fn register<AS, IS>(
    State(state): State<AppState<AS, IS>>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, ApiError>
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    login: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid login: {0}")]
    Login(#[from] LoginError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let login = Login::new(self.login)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(login, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(login: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let command = request("bob", "password123").try_into_command().unwrap();
        assert_eq!(command.login.as_str(), "bob");
        assert_eq!(command.password.expose(), "password123");
    }

    #[test]
    fn test_invalid_fields_are_unprocessable() {
        let error = ApiError::from(request("b", "password123").try_into_command().unwrap_err());
        assert!(matches!(error, ApiError::UnprocessableEntity(msg) if msg.contains("login")));

        let error = ApiError::from(request("bob", "short").try_into_command().unwrap_err());
        assert!(matches!(error, ApiError::UnprocessableEntity(msg) if msg.contains("password")));
    }
}
