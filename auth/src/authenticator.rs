use chrono::Duration;

use crate::jwt::SigningError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Secret hashed once at construction so that unknown accounts still pay
/// for a full Argon2 verification.
const DECOY_SECRET: &str = "decoy-secret-never-issued";

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and RS512 token signing.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_ttl: Duration,
    decoy_hash: String,
}

/// Identity to embed in the token once the secret checks out.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub account_id: &'a str,
    pub login_name: &'a str,
    pub role: &'a str,
    pub origin: Option<&'a str>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Configured Argon2id hasher
    /// * `token_issuer` - Issuer holding the private signing key
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `PasswordError` - Decoy hash could not be computed
    pub fn new(
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        token_ttl: Duration,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = password_hasher.hash(DECOY_SECRET)?;

        Ok(Self {
            password_hasher,
            token_issuer,
            token_ttl,
            decoy_hash,
        })
    }

    /// Lifetime of tokens issued by this authenticator.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a secret against a stored hash and issue a token.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `stored_hash` - Stored PHC hash
    /// * `subject` - Identity to place in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match
    /// * `Password` - Stored hash is malformed
    /// * `Signing` - Token generation failed
    pub fn authenticate(
        &self,
        secret: &str,
        stored_hash: &str,
        subject: &TokenSubject<'_>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(secret, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(
            subject.account_id,
            subject.login_name,
            subject.role,
            subject.origin,
            self.token_ttl,
        )?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a verification against the decoy hash first so the call costs
    /// the same as a wrong password.
    pub fn reject_unknown_account(&self, secret: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(secret, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }
}
