use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::principal::AuthenticationPass;
use super::principal::Principal;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BEARER_PREFIX: &str = "Bearer ";

/// Request authenticator.
///
/// Runs once per request before any handler:
/// - no `Authorization` header, or a scheme other than `Bearer`: continue anonymously
/// - expired token: 401 "Token expired", handler not reached
/// - malformed or forged token: 401 "Invalid token", handler not reached
/// - subject no longer exists: 401 "User not found"
/// - otherwise the resolved identity is attached as a [`Principal`] unless one is already set
///
/// Handlers that need an identity reject anonymous requests themselves.
pub async fn authenticate<AS, IS>(
    State(state): State<AppState<AS, IS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    if req.extensions().get::<AuthenticationPass>().is_some() {
        return Ok(next.run(req).await);
    }
    req.extensions_mut().insert(AuthenticationPass);

    let Some(token) = extract_bearer_token(&req).map(str::to_owned) else {
        return Ok(next.run(req).await);
    };

    let login = state
        .authenticator
        .extract_subject(&token)
        .map_err(|e| match e {
            TokenError::Expired => {
                tracing::warn!("Rejected expired token");
                ApiError::Unauthorized("Token expired".to_string())
            }
            other => {
                tracing::warn!(error = %other, "Rejected invalid token");
                ApiError::Unauthorized("Invalid token".to_string())
            }
        })?;

    if req.extensions().get::<Principal>().is_none() {
        let user = state
            .auth_service
            .find_identity(&login)
            .await
            .map_err(|e| {
                if let UserError::NotFound(_) = e {
                    tracing::warn!(login = %login, "Token subject does not exist");
                }
                ApiError::from(e)
            })?;

        if state.authenticator.is_token_valid(&token) {
            tracing::debug!(user_id = %user.id, login = %user.login, "Request authenticated");
            req.extensions_mut().insert(Principal::from(&user));
        } else {
            tracing::warn!(login = %login, "Token failed revalidation");
        }
    }

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
}
