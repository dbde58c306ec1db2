use std::path::Path;

use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::VerificationError;
use super::issuer::SIGNING_ALGORITHM;
use crate::keys::load_public_key;
use crate::keys::KeyLoadError;
use crate::keys::PublicKey;

/// Access token verifier.
///
/// Stateless: validity is derived from the token and the public key alone.
pub struct TokenVerifier {
    public_key: PublicKey,
}

impl TokenVerifier {
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    /// Load the public key from an SPKI PEM file and build a verifier.
    ///
    /// # Errors
    /// * `KeyLoadError` - Key file could not be loaded
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        load_public_key(path).map(Self::new)
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Checks, in order: structure, RS512 signature, issuer, expiry. No
    /// clock leeway is granted.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `expected_issuer` - Required `iss` value
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `Expired` - `exp` is in the past
    /// * `Invalid` - Bad signature, wrong algorithm, wrong issuer, missing claim
    pub fn verify(&self, token: &str, expected_issuer: &str) -> Result<Claims, VerificationError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[expected_issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<Claims>(token, self.public_key.decoding_key(), &validation)
            .map_err(map_jwt_error)?;

        Ok(token_data.claims)
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> VerificationError {
    match error.kind() {
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => VerificationError::Malformed(error.to_string()),
        _ => VerificationError::Invalid(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::Duration;
    use chrono::Utc;
    use jsonwebtoken::encode;
    use jsonwebtoken::Algorithm;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;

    use super::*;
    use crate::jwt::claims::DEFAULT_ROLE;
    use crate::jwt::claims::TOKEN_ISSUER;
    use crate::jwt::issuer::TokenIssuer;

    fn key_path(name: &str) -> String {
        format!("{}/../testdata/keys/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::from_key_file(key_path("signing_private.pem")).unwrap()
    }

    fn foreign_issuer() -> TokenIssuer {
        TokenIssuer::from_key_file(key_path("foreign_private.pem")).unwrap()
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::from_key_file(key_path("signing_public.pem")).unwrap()
    }

    fn claims_expiring_at(exp: i64) -> Claims {
        Claims::for_account("42", "alice", DEFAULT_ROLE, Duration::hours(1)).with_expiration(exp)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issuer()
            .issue("42", "alice", "USER", Some("10.1.2.3"), Duration::hours(1))
            .unwrap();

        let claims = verifier().verify(&token, TOKEN_ISSUER).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.id, "42");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.ip, Some("10.1.2.3".to_string()));
    }

    #[test]
    fn test_repeated_verification_is_stable() {
        let token = issuer()
            .issue("42", "alice", "USER", None, Duration::hours(1))
            .unwrap();
        let verifier = verifier();

        let first = verifier.verify(&token, TOKEN_ISSUER).unwrap();
        let second = verifier.verify(&token, TOKEN_ISSUER).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_one_second_ago() {
        let token = issuer()
            .sign(&claims_expiring_at(Utc::now().timestamp() - 1))
            .unwrap();

        let result = verifier().verify(&token, TOKEN_ISSUER);
        assert_eq!(result, Err(VerificationError::Expired));
    }

    #[test]
    fn test_expires_in_one_second() {
        let token = issuer()
            .sign(&claims_expiring_at(Utc::now().timestamp() + 1))
            .unwrap();

        assert!(verifier().verify(&token, TOKEN_ISSUER).is_ok());
    }

    #[test]
    fn test_foreign_key_pair_rejected() {
        let token = foreign_issuer()
            .issue("42", "alice", "USER", None, Duration::hours(1))
            .unwrap();

        let result = verifier().verify(&token, TOKEN_ISSUER);
        assert!(matches!(result, Err(VerificationError::Invalid(_))));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let claims = Claims::for_account("42", "alice", DEFAULT_ROLE, Duration::hours(1))
            .with_issuer("someone-else");
        let token = issuer().sign(&claims).unwrap();

        let result = verifier().verify(&token, TOKEN_ISSUER);
        assert!(matches!(result, Err(VerificationError::Invalid(_))));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let token = issuer()
            .issue("42", "alice", "USER", None, Duration::hours(1))
            .unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        claims["role"] = serde_json::json!("ADMIN");
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        let result = verifier().verify(&forged, TOKEN_ISSUER);
        assert!(matches!(result, Err(VerificationError::Invalid(_))));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = issuer()
            .issue("42", "alice", "USER", None, Duration::hours(1))
            .unwrap();
        let (unsigned, signature) = token.rsplit_once('.').unwrap();

        let mut signature_bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        signature_bytes[0] ^= 0x01;
        let forged = format!("{}.{}", unsigned, URL_SAFE_NO_PAD.encode(signature_bytes));

        assert!(verifier().verify(&forged, TOKEN_ISSUER).is_err());
    }

    #[test]
    fn test_symmetric_algorithm_rejected() {
        let claims = Claims::for_account("42", "alice", DEFAULT_ROLE, Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"guessable_secret_at_least_32_bytes!"),
        )
        .unwrap();

        let result = verifier().verify(&token, TOKEN_ISSUER);
        assert!(matches!(result, Err(VerificationError::Invalid(_))));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let verifier = verifier();

        for token in ["", "not-a-jwt", "invalid.token.here", "a.b", "...."] {
            let result = verifier.verify(token, TOKEN_ISSUER);
            assert!(result.is_err(), "accepted {:?}", token);
        }
    }

    #[test]
    fn test_missing_identity_claims_rejected() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            iss: String,
            exp: i64,
        }

        let partial = Partial {
            sub: "alice".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            exp: Utc::now().timestamp() + 60,
        };
        let token = encode(
            &Header::new(Algorithm::RS512),
            &partial,
            &EncodingKey::from_rsa_pem(
                std::fs::read(key_path("signing_private.pem")).unwrap().as_slice(),
            )
            .unwrap(),
        )
        .unwrap();

        let result = verifier().verify(&token, TOKEN_ISSUER);
        assert!(matches!(result, Err(VerificationError::Malformed(_))));
    }
}
