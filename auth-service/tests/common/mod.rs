use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Argon2Params;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenVerifier;
use auth_service::account::errors::AccountError;
use auth_service::account::models::Account;
use auth_service::account::models::AccountId;
use auth_service::account::models::LoginName;
use auth_service::account::ports::AccountRepository;
use auth_service::domain::account::service::LoginService;
use auth_service::inbound::http::router::create_router;

pub const COOKIE_NAME: &str = "auth-token";
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub verifier: TokenVerifier,
    pub alice_id: AccountId,
}

/// In-memory account store standing in for PostgreSQL
pub struct InMemoryAccountRepository {
    accounts: HashMap<String, Account>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_login_name(
        &self,
        login_name: &LoginName,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.get(login_name.as_str()).cloned())
    }
}

/// Account store that is always down
pub struct UnavailableAccountRepository;

#[async_trait]
impl AccountRepository for UnavailableAccountRepository {
    async fn find_by_login_name(
        &self,
        _login_name: &LoginName,
    ) -> Result<Option<Account>, AccountError> {
        Err(AccountError::DatabaseError(
            "pool timed out while waiting for an open connection".to_string(),
        ))
    }
}

fn key_path(name: &str) -> String {
    format!("{}/../testdata/keys/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn authenticator() -> Arc<Authenticator> {
    let hasher = PasswordHasher::with_params(&Argon2Params {
        iterations: 1,
        memory: 1024,
        parallelism: 1,
        salt_length: 16,
        hash_length: 32,
    })
    .expect("Invalid Argon2 parameters");
    let issuer = TokenIssuer::from_key_file(key_path("signing_private.pem"))
        .expect("Failed to load signing key");

    Arc::new(
        Authenticator::new(hasher, issuer, chrono::Duration::hours(TOKEN_TTL_HOURS))
            .expect("Failed to build authenticator"),
    )
}

impl TestApp {
    /// Spawn the application with `alice / correct-password` registered
    pub async fn spawn() -> Self {
        let authenticator = authenticator();

        let alice = Account {
            id: AccountId::new(),
            login_name: LoginName::new("alice".to_string()).unwrap(),
            password_hash: authenticator
                .hash_password("correct-password")
                .expect("Failed to hash password"),
        };
        let alice_id = alice.id;

        let repository = InMemoryAccountRepository {
            accounts: HashMap::from([("alice".to_string(), alice)]),
        };

        let mut app = Self::spawn_with(repository, authenticator).await;
        app.alice_id = alice_id;
        app
    }

    /// Spawn the application on top of the given account store
    pub async fn spawn_with<AR: AccountRepository>(
        repository: AR,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let login_service = Arc::new(LoginService::new(Arc::new(repository), authenticator));
        let application = create_router(login_service, COOKIE_NAME);

        tokio::spawn(async move {
            axum::serve(
                listener,
                application.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            verifier: TokenVerifier::from_key_file(key_path("signing_public.pem"))
                .expect("Failed to load public key"),
            alice_id: AccountId::new(),
        }
    }

    pub async fn spawn_unavailable() -> Self {
        Self::spawn_with(UnavailableAccountRepository, authenticator()).await
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }
}
