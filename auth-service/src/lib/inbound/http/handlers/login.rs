use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Credential;
use crate::account::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;

    let command = LoginCommand {
        credential: Credential {
            login_name: body.login_name,
            secret: body.secret,
        },
        origin: connect_info.map(|ConnectInfo(address)| address.ip()),
    };

    let outcome = state.login_service.login(command).await?;

    let cookie = auth::cookie::auth_cookie(&state.cookie_name, &outcome.token, outcome.expires_in);

    Ok((
        [(SET_COOKIE, cookie.to_string())],
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                login_name: outcome.login_name.to_string(),
                token: outcome.token,
                expires_in: outcome.expires_in.num_seconds(),
            },
        ),
    )
        .into_response())
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(rename = "loginName", alias = "username")]
    login_name: String,
    #[serde(alias = "password")]
    secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub login_name: String,
    pub token: String,
    pub expires_in: i64,
}
