use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderMap;
use axum::response::Response;
use thiserror::Error;

/// Headers that describe a single connection and are never forwarded.
///
/// `content-length` is recomputed from the buffered body on each side.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("No upstream route for path: {0}")]
    NoRoute(String),

    #[error("Request body exceeds the forwarding limit")]
    BodyTooLarge,

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Failed to build proxy client: {0}")]
    Client(String),
}

/// Path prefix served by one downstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    prefix: String,
    upstream: String,
}

impl Route {
    pub fn new(prefix: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            upstream: upstream.into().trim_end_matches('/').to_string(),
        }
    }

    /// Prefix match on segment boundaries: `/api/notes` covers `/api/notes/1`
    /// but not `/api/notesx`.
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || self.prefix.ends_with('/'),
            None => false,
        }
    }
}

/// Reverse proxy forwarding admitted requests to downstream services.
#[derive(Debug, Clone)]
pub struct HttpProxy {
    client: reqwest::Client,
    routes: Vec<Route>,
    max_body_bytes: usize,
}

impl HttpProxy {
    pub fn new(
        routes: Vec<Route>,
        timeout: Duration,
        max_body_bytes: usize,
    ) -> Result<Self, ProxyError> {
        // Redirects from downstream belong to the client
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            routes,
            max_body_bytes,
        })
    }

    /// Route with the longest prefix matching `path`.
    pub fn route_for(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .filter(|route| route.matches(path))
            .max_by_key(|route| route.prefix.len())
    }

    /// Forward the request unchanged apart from hop-by-hop headers.
    pub async fn forward(&self, request: Request) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();

        let route = self
            .route_for(parts.uri.path())
            .ok_or_else(|| ProxyError::NoRoute(parts.uri.path().to_string()))?;

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|value| value.as_str())
            .unwrap_or("/");
        let url = format!("{}{}", route.upstream, path_and_query);

        let body = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|_| ProxyError::BodyTooLarge)?;

        let mut headers = end_to_end_headers(&parts.headers);
        headers.remove(header::HOST);

        tracing::debug!(method = %parts.method, url = %url, "Forwarding request");

        let upstream_response = self
            .client
            .request(parts.method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream_response.status();
        let headers = end_to_end_headers(upstream_response.headers());
        let bytes = upstream_response.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}

fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in HOP_BY_HOP_HEADERS {
        forwarded.remove(*name);
    }
    forwarded
}
