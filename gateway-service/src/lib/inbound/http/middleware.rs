use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::uri::PathAndQuery;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::access::models::RejectReason;
use crate::access::models::RequestDecision;
use crate::access::paths::normalize_path;
use crate::access::service::decide;
use crate::inbound::http::router::AppState;

/// Middleware that admits or rejects every request before it is proxied.
///
/// The path is normalized first and the request is rewritten to it, so the
/// path that is classified is the path that is forwarded. Admitted protected
/// requests carry the verified `Identity` in their extensions.
pub async fn edge_filter(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(uri) = canonical_uri(req.uri()) else {
        tracing::warn!(uri = %req.uri(), "Request path rejected");
        return StatusCode::BAD_REQUEST.into_response();
    };
    *req.uri_mut() = uri;

    let token = extract_token(req.headers(), &state.cookie_name);

    let decision = decide(
        req.uri().path(),
        token.as_deref(),
        &state.path_rules,
        state.token_validator.as_ref(),
    );

    match decision {
        RequestDecision::ForwardAnonymous => next.run(req).await,
        RequestDecision::Forward(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        RequestDecision::Reject(reason) => reject(&state, reason),
    }
}

/// Request URI with its path normalized, query untouched.
fn canonical_uri(uri: &Uri) -> Option<Uri> {
    let path = normalize_path(uri.path())?;
    if path == uri.path() {
        return Some(uri.clone());
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}

/// Bearer header first, then the auth cookie.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Redirect to the login page and clear the auth cookie.
fn reject(state: &AppState, reason: RejectReason) -> Response {
    let location = format!("{}#error={}", state.login_path, reason.marker());
    let cookie = auth::cookie::removal_cookie(&state.cookie_name);

    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::SET_COOKIE, cookie.to_string()),
        ],
    )
        .into_response()
}
