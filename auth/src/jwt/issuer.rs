use std::path::Path;

use chrono::Duration;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::SigningError;
use crate::keys::load_private_key;
use crate::keys::KeyLoadError;
use crate::keys::PrivateKey;

/// Signature algorithm shared by issuer and verifier.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS512;

/// Access token issuer.
///
/// Signs claims with RS512 (RSA PKCS#1 v1.5 over SHA-512). Holds the private
/// key for the lifetime of the process; safe to share across requests.
pub struct TokenIssuer {
    private_key: PrivateKey,
}

impl TokenIssuer {
    /// Create an issuer around an already loaded private key.
    pub fn new(private_key: PrivateKey) -> Self {
        Self { private_key }
    }

    /// Load the private key from a PKCS#8 PEM file and build an issuer.
    ///
    /// # Errors
    /// * `KeyLoadError` - Key file could not be loaded
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        load_private_key(path).map(Self::new)
    }

    /// Issue a signed token for an authenticated account.
    ///
    /// # Arguments
    /// * `account_id` - Account identifier (`id` claim)
    /// * `login_name` - Login name (`sub` claim)
    /// * `role` - Role granted to the bearer
    /// * `origin` - Optional network origin of the login request (`ip` claim)
    /// * `ttl` - Token lifetime, `exp = iat + ttl`
    ///
    /// # Returns
    /// Compact `header.claims.signature` token
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        account_id: &str,
        login_name: &str,
        role: &str,
        origin: Option<&str>,
        ttl: Duration,
    ) -> Result<String, SigningError> {
        let mut claims = Claims::for_account(account_id, login_name, role, ttl);
        if let Some(origin) = origin {
            claims = claims.with_origin(origin);
        }

        self.sign(&claims)
    }

    /// Sign an arbitrary claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn sign(&self, claims: &Claims) -> Result<String, SigningError> {
        let header = Header::new(SIGNING_ALGORITHM);

        encode(&header, claims, self.private_key.encoding_key())
            .map_err(|e| SigningError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::from_key_file(format!(
            "{}/../testdata/keys/signing_private.pem",
            env!("CARGO_MANIFEST_DIR")
        ))
        .expect("Failed to load signing key")
    }

    fn decode_segment(segment: &str) -> serde_json::Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).expect("Invalid base64url");
        serde_json::from_slice(&bytes).expect("Invalid JSON")
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = issuer()
            .issue("42", "alice", "USER", None, Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_header_declares_rs512() {
        let token = issuer()
            .issue("42", "alice", "USER", None, Duration::hours(1))
            .unwrap();

        let header = decode_segment(token.split('.').next().unwrap());
        assert_eq!(header["alg"], "RS512");
    }

    #[test]
    fn test_claims_segment_contents() {
        let token = issuer()
            .issue("42", "alice", "USER", Some("192.168.1.20"), Duration::hours(2))
            .unwrap();

        let claims = decode_segment(token.split('.').nth(1).unwrap());
        assert_eq!(claims["sub"], "alice");
        assert_eq!(claims["id"], "42");
        assert_eq!(claims["role"], "USER");
        assert_eq!(claims["iss"], "auth-service");
        assert_eq!(claims["ip"], "192.168.1.20");

        let lifetime = claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap();
        assert_eq!(lifetime, 2 * 60 * 60);
    }
}
