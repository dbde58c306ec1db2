use auth::VerificationError;

use crate::access::models::Identity;

/// Port for token validation at the edge.
pub trait TokenValidator: Send + Sync + 'static {
    /// Verify a token and extract the caller identity.
    ///
    /// # Errors
    /// Any `VerificationError`. The variant is for logging only; every
    /// failure is handled the same way.
    fn validate(&self, token: &str) -> Result<Identity, VerificationError>;
}
