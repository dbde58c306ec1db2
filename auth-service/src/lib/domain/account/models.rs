use std::fmt;
use std::net::IpAddr;

use chrono::Duration;
use uuid::Uuid;

use crate::account::errors::LoginNameError;

/// Stored account record.
///
/// Owned by the account store; read-only to the login flow.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub login_name: LoginName,
    pub password_hash: String,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login name value type
///
/// Ensures login name is 2-50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginName(String);

impl LoginName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid login name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    /// * `TooLong` - More than 50 characters
    pub fn new(login_name: String) -> Result<Self, LoginNameError> {
        let length = login_name.chars().count();

        if length < Self::MIN_LENGTH {
            return Err(LoginNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        if length > Self::MAX_LENGTH {
            return Err(LoginNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(login_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login attempt. Transient, never persisted.
#[derive(Clone)]
pub struct Credential {
    pub login_name: String,
    pub secret: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login_name", &self.login_name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Login command: credentials plus the caller's network origin.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub credential: Credential,
    pub origin: Option<IpAddr>,
}

/// Successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub login_name: LoginName,
    pub expires_in: Duration,
}
