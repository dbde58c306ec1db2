use axum::extract::Request;
use axum::extract::State;
use axum::response::Response;
use axum::Extension;

use super::ApiError;
use crate::access::models::Identity;
use crate::inbound::http::router::AppState;

/// Fallback handler: every request that passed the edge filter ends up here.
pub async fn forward(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    request: Request,
) -> Result<Response, ApiError> {
    match identity {
        Some(Extension(identity)) => tracing::debug!(
            subject = %identity.subject,
            authority = %identity.authority(),
            "Forwarding authenticated request"
        ),
        None => tracing::debug!("Forwarding anonymous request"),
    }

    Ok(state.proxy.forward(request).await?)
}
