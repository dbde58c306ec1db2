use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::LoginError;
use crate::account::models::Account;
use crate::account::models::LoginCommand;
use crate::account::models::LoginName;
use crate::account::models::LoginOutcome;

/// Port for the login use case.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Login name, secret and caller origin
    ///
    /// # Returns
    /// Signed token and its lifetime
    ///
    /// # Errors
    /// * `CredentialInvalid` - Unknown account or wrong secret, indistinguishably
    /// * `Unavailable` - Store, hash or signing failure
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError>;
}

/// Port for account lookup.
///
/// Implementations must return within a bounded time or fail.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Find an account by its unique login name.
    ///
    /// # Returns
    /// `None` when no such account exists
    ///
    /// # Errors
    /// * `DatabaseError` - Store unavailable or query failed
    async fn find_by_login_name(
        &self,
        login_name: &LoginName,
    ) -> Result<Option<Account>, AccountError>;
}
