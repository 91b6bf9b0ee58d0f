use std::sync::Arc;

use account_service::config::Config;
use account_service::config::StorageBackend;
use account_service::domain::user::ports::CredentialStore;
use account_service::domain::user::service::AuthSettings;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::catalog::StaticHomeCatalog;
use account_service::outbound::repositories::InMemoryCredentialStore;
use account_service::outbound::repositories::PostgresCredentialStore;
use auth::Authenticator;
use auth::SharedClock;
use mockable::DefaultClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // Reject nonsensical values before touching the database.
    let token_lifetime = config.token_lifetime()?;
    let settings = config.auth_settings()?;

    match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = PostgresCredentialStore::new(pg_pool);
            serve(&config, token_lifetime, settings, store).await
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory credential store; accounts are lost on restart");
            let store = InMemoryCredentialStore::new();
            serve(&config, token_lifetime, settings, store).await
        }
    }
}

async fn serve<CS: CredentialStore>(
    config: &Config,
    token_lifetime: chrono::Duration,
    settings: AuthSettings,
    store: CS,
) -> Result<(), anyhow::Error> {
    let clock: SharedClock = Arc::new(DefaultClock);
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        token_lifetime,
        Arc::clone(&clock),
    ));

    let user_service = Arc::new(UserService::new(
        Arc::new(store),
        Arc::new(StaticHomeCatalog::new()),
        Arc::clone(&authenticator),
        settings,
        clock,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator, config.request_timeout());

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
