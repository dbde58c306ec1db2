use std::sync::Arc;
use std::time::Duration;

use auth::TokenVerifier;
use gateway_service::access::paths::PathRules;
use gateway_service::config::Config;
use gateway_service::inbound::http::router::create_router;
use gateway_service::outbound::proxy::Route;
use gateway_service::outbound::HttpProxy;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gateway-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_key_path = %config.jwt.public_key_path,
        cookie_name = %config.cookie.auth_name,
        login_path = %config.login_path,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    // Fail closed: without the verification key no protected request is ever admitted
    let token_verifier = TokenVerifier::from_key_file(&config.jwt.public_key_path)?;
    tracing::info!(algorithm = "RS512", "Verification key loaded");

    let path_rules = PathRules::public_endpoints();
    tracing::info!(patterns = ?path_rules.patterns(), "Public paths registered");

    let routes = config
        .routes
        .iter()
        .map(|route| {
            tracing::info!(prefix = %route.prefix, upstream = %route.upstream, "Route registered");
            Route::new(route.prefix.as_str(), route.upstream.as_str())
        })
        .collect();

    let proxy = HttpProxy::new(
        routes,
        Duration::from_secs(config.proxy.timeout_seconds),
        config.proxy.max_body_bytes,
    )?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        Arc::new(token_verifier),
        path_rules,
        proxy,
        &config.cookie.auth_name,
        &config.login_path,
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
