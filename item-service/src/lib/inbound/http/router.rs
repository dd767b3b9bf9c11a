use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_item::create_item;
use super::handlers::health::health;
use super::handlers::list_items::list_items;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::ports::AuthServicePort;

/// Shared state for handlers and the request authenticator.
pub struct AppState<AS, IS>
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    pub auth_service: Arc<AS>,
    pub item_service: Arc<IS>,
    pub authenticator: Arc<Authenticator>,
}

impl<AS, IS> Clone for AppState<AS, IS>
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            item_service: Arc::clone(&self.item_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<AS, IS>(
    auth_service: Arc<AS>,
    item_service: Arc<IS>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    let state = AppState {
        auth_service,
        item_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/register", post(register::<AS, IS>))
        .route("/login", post(login::<AS, IS>));

    // Identity is enforced by the `Principal` extractor in each handler.
    let item_routes = Router::new().route(
        "/items",
        post(create_item::<AS, IS>).get(list_items::<AS, IS>),
    );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(item_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<AS, IS>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
