use auth::TokenVerifier;
use auth::VerificationError;
use auth::TOKEN_ISSUER;

use crate::access::models::Identity;
use crate::access::ports::TokenValidator;

impl TokenValidator for TokenVerifier {
    fn validate(&self, token: &str) -> Result<Identity, VerificationError> {
        let claims = self.verify(token, TOKEN_ISSUER)?;

        Ok(Identity::new(claims.sub, claims.role))
    }
}
