use thiserror::Error;

/// Error for LoginName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginNameError {
    #[error("Login name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Login name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for account store operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid login name: {0}")]
    InvalidLoginName(#[from] LoginNameError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Outcome classes of a failed login.
///
/// Only two are visible to callers: bad credentials (whatever the reason)
/// and everything else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid credentials")]
    CredentialInvalid,

    #[error("Login unavailable: {0}")]
    Unavailable(String),
}
