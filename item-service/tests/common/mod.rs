use std::sync::Arc;

use auth::Authenticator;
use auth::SigningKey;
use chrono::Duration;
use chrono::Utc;
use item_service::domain::item::service::ItemService;
use item_service::domain::user::service::AuthService;
use item_service::inbound::http::router::create_router;
use item_service::outbound::repositories::InMemoryItemRepository;
use item_service::outbound::repositories::InMemoryUserRepository;
use reqwest::StatusCode;
use serde_json::json;

pub const PASSWORD: &str = "correct horse battery";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            &SigningKey::generate(),
            Duration::hours(1),
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));
        let item_service = Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new())));

        let router = create_router(auth_service, item_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub async fn register(&self, login: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({ "login": login, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, login: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({ "login": login, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register `login` with [`PASSWORD`] and return a fresh token for it
    pub async fn register_and_login(&self, login: &str) -> String {
        let response = self.register(login, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = self.login(login, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }

    /// Token signed by this server that expired an hour ago
    pub fn expired_token(&self, login: &str) -> String {
        self.authenticator
            .tokens()
            .issue_at(login, Utc::now() - Duration::hours(2))
            .expect("Failed to issue token")
    }
}
