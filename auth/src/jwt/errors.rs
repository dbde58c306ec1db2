use thiserror::Error;

/// Error type for token signing.
#[derive(Debug, Clone, Error)]
pub enum SigningError {
    #[error("Failed to sign token: {0}")]
    EncodingFailed(String),
}

/// Error type for token verification.
///
/// The variants exist for server-side logging only. Callers must treat every
/// variant as the same rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

impl VerificationError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::Invalid(_) => "invalid",
            VerificationError::Expired => "expired",
            VerificationError::Malformed(_) => "malformed",
        }
    }
}
