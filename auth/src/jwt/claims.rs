use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer stamped into every token and required on verification.
pub const TOKEN_ISSUER: &str = "auth-service";

/// Role granted to accounts authenticated through the login endpoint.
pub const DEFAULT_ROLE: &str = "USER";

/// Identity claims carried by an access token.
///
/// Flat key-value map on the wire. `ip` is the optional network origin
/// of the login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (login name)
    pub sub: String,

    /// Account identifier
    pub id: String,

    pub role: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl Claims {
    /// Create claims for an authenticated account, valid for `ttl` from now.
    ///
    /// # Arguments
    /// * `account_id` - Opaque account identifier
    /// * `login_name` - Login name, stored as the subject
    /// * `role` - Role granted to the bearer
    /// * `ttl` - Token lifetime
    pub fn for_account(
        account_id: impl ToString,
        login_name: impl ToString,
        role: impl ToString,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: login_name.to_string(),
            id: account_id.to_string(),
            role: role.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            ip: None,
        }
    }

    /// Set the network origin claim.
    pub fn with_origin(mut self, origin: impl ToString) -> Self {
        self.ip = Some(origin.to_string());
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = iss.to_string();
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}
