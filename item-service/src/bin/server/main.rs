use std::sync::Arc;

use auth::Authenticator;
use auth::SigningKey;
use item_service::config::Config;
use item_service::domain::item::ports::ItemRepository;
use item_service::domain::item::service::ItemService;
use item_service::domain::user::ports::UserRepository;
use item_service::domain::user::service::AuthService;
use item_service::inbound::http::router::create_router;
use item_service::outbound::repositories::InMemoryItemRepository;
use item_service::outbound::repositories::InMemoryUserRepository;
use item_service::outbound::repositories::PostgresItemRepository;
use item_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "item-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = if config.database.is_some() { "postgresql" } else { "memory" },
        "Configuration loaded"
    );

    let signing_key = SigningKey::generate();
    let authenticator = Arc::new(Authenticator::new(
        &signing_key,
        chrono::Duration::seconds(config.token.ttl_seconds),
    ));
    tracing::warn!(
        token_ttl_seconds = authenticator.tokens().ttl().num_seconds(),
        "Generated process signing key; tokens issued before this start are no longer valid"
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(
                http_listener,
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresItemRepository::new(pg_pool)),
                authenticator,
            )
            .await
        }
        None => {
            tracing::warn!("No database configured; users and items are kept in memory");

            serve(
                http_listener,
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryItemRepository::new()),
                authenticator,
            )
            .await
        }
    }
}

async fn serve<UR, IR>(
    listener: TcpListener,
    user_repository: Arc<UR>,
    item_repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
) -> Result<(), anyhow::Error>
where
    UR: UserRepository,
    IR: ItemRepository,
{
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let item_service = Arc::new(ItemService::new(item_repository));

    let http_application = create_router(auth_service, item_service, authenticator);

    if let Err(e) = axum::serve(listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
