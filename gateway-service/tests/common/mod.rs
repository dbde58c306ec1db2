use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use auth::TokenVerifier;
use axum::extract::Request;
use axum::http::header;
use axum::Json;
use axum::Router;
use gateway_service::access::paths::PathRules;
use gateway_service::inbound::http::router::create_router;
use gateway_service::outbound::proxy::Route;
use gateway_service::outbound::HttpProxy;
use serde_json::json;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;

pub const COOKIE_NAME: &str = "auth-token";
pub const LOGIN_PATH: &str = "/login";

/// Gateway in front of an upstream that echoes what it received
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub issuer: TokenIssuer,
    pub foreign_issuer: TokenIssuer,
}

fn key_path(name: &str) -> String {
    format!("{}/../testdata/keys/{}", env!("CARGO_MANIFEST_DIR"), name)
}

async fn echo(request: Request) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "authorization": header_value(header::AUTHORIZATION),
        "cookie": header_value(header::COOKIE),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    format!("http://127.0.0.1:{}", port)
}

impl TestApp {
    /// Spawn an echo upstream and a gateway routing everything to it
    pub async fn spawn() -> Self {
        let upstream = serve(Router::new().fallback(echo)).await;

        Self::spawn_with_routes(vec![Route::new("/", upstream)]).await
    }

    pub async fn spawn_with_routes(routes: Vec<Route>) -> Self {
        let verifier = TokenVerifier::from_key_file(key_path("signing_public.pem"))
            .expect("Failed to load public key");
        let proxy = HttpProxy::new(routes, Duration::from_secs(5), 1024 * 1024)
            .expect("Failed to build proxy");

        let gateway = create_router(
            Arc::new(verifier),
            PathRules::public_endpoints(),
            proxy,
            COOKIE_NAME,
            LOGIN_PATH,
        );
        let address = serve(gateway).await;

        Self {
            address,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap(),
            issuer: TokenIssuer::from_key_file(key_path("signing_private.pem"))
                .expect("Failed to load signing key"),
            foreign_issuer: TokenIssuer::from_key_file(key_path("foreign_private.pem"))
                .expect("Failed to load foreign key"),
        }
    }

    /// Token for `alice` valid for `ttl`
    pub fn token(&self, ttl: chrono::Duration) -> String {
        self.issuer
            .issue("42", "alice", "USER", Some("127.0.0.1"), ttl)
            .expect("Failed to sign token")
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Send a GET with the request target written verbatim.
    ///
    /// HTTP clients resolve dot segments before sending, so this goes
    /// straight to the socket. Returns the raw response text.
    pub async fn raw_get(&self, target: &str, extra_headers: &[(&str, &str)]) -> String {
        let authority = self.address.trim_start_matches("http://");
        let mut stream = tokio::net::TcpStream::connect(authority)
            .await
            .expect("Failed to connect");

        let mut request = format!("GET {} HTTP/1.1\r\nHost: {}\r\n", target, authority);
        for (name, value) in extra_headers {
            request.push_str(&format!("{}: {}\r\n", name, value));
        }
        request.push_str("Connection: close\r\n\r\n");

        stream
            .write_all(request.as_bytes())
            .await
            .expect("Failed to write request");

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .await
            .expect("Failed to read response");

        String::from_utf8_lossy(&response).into_owned()
    }
}
