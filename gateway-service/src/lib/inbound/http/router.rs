use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::forward::forward;
use super::middleware::edge_filter;
use crate::access::paths::PathRules;
use crate::access::ports::TokenValidator;
use crate::outbound::proxy::HttpProxy;

/// Shared, read-only state of the ingress tier.
#[derive(Clone)]
pub struct AppState {
    pub token_validator: Arc<dyn TokenValidator>,
    pub path_rules: Arc<PathRules>,
    pub proxy: Arc<HttpProxy>,
    pub cookie_name: Arc<str>,
    pub login_path: Arc<str>,
}

pub fn create_router(
    token_validator: Arc<dyn TokenValidator>,
    path_rules: PathRules,
    proxy: HttpProxy,
    cookie_name: &str,
    login_path: &str,
) -> Router {
    let state = AppState {
        token_validator,
        path_rules: Arc::new(path_rules),
        proxy: Arc::new(proxy),
        cookie_name: Arc::from(cookie_name),
        login_path: Arc::from(login_path),
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry credentials
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
        .fallback(forward)
        .layer(middleware::from_fn_with_state(state.clone(), edge_filter))
        .layer(trace_layer)
        .with_state(state)
}
