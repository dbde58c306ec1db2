use std::net::SocketAddr;
use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth_service::config::Config;
use auth_service::domain::account::service::LoginService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresAccountRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        private_key_path = %config.jwt.private_key_path,
        expiration_hours = config.jwt.expiration_hours,
        cookie_name = %config.cookie.auth_name,
        "Configuration loaded"
    );

    // Fail fast: a process without its signing key never serves a login
    let token_issuer = TokenIssuer::from_key_file(&config.jwt.private_key_path)?;
    tracing::info!(algorithm = "RS512", "Signing key loaded");

    let password_hasher = PasswordHasher::with_params(&config.argon2)?;
    let authenticator = Arc::new(Authenticator::new(
        password_hasher,
        token_issuer,
        chrono::Duration::hours(config.jwt.expiration_hours),
    )?);

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

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let login_service = Arc::new(LoginService::new(account_repository, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(login_service, &config.cookie.auth_name);

    axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
