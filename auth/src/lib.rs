//! Authentication utilities library
//!
//! Provides the authentication boundary shared by the login service and the gateway:
//! - RSA key material loading (PKCS#8 private, X.509 SPKI public)
//! - Password hashing (Argon2id)
//! - RS512 token issuance and verification
//! - Credential cookie contract
//! - Authentication coordination
//!
//! The private key only ever lives in the issuing service; the gateway holds the
//! public half and verifies every request without contacting the issuer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```no_run
//! use auth::{TokenIssuer, TokenVerifier, TOKEN_ISSUER};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::from_key_file("keys/private.pem").unwrap();
//! let token = issuer
//!     .issue("42", "alice", "USER", Some("127.0.0.1"), Duration::hours(24))
//!     .unwrap();
//!
//! let verifier = TokenVerifier::from_key_file("keys/public.pem").unwrap();
//! let claims = verifier.verify(&token, TOKEN_ISSUER).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod cookie;
pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::TokenSubject;
pub use jwt::Claims;
pub use jwt::SigningError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use jwt::VerificationError;
pub use jwt::DEFAULT_ROLE;
pub use jwt::TOKEN_ISSUER;
pub use keys::KeyLoadError;
pub use password::Argon2Params;
pub use password::PasswordError;
pub use password::PasswordHasher;
