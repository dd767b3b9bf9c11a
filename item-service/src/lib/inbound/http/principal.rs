use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Identity attached to a request by the request authenticator.
///
/// Lives in the request extensions for the duration of one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub login: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            login: user.login.as_str().to_string(),
        }
    }
}

/// Marks a request the authenticator has already processed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AuthenticationPass;

/// Handlers that take a `Principal` reject anonymous requests with 401.
#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
