use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenSubject;
use auth::DEFAULT_ROLE;

use crate::account::errors::LoginError;
use crate::account::models::LoginCommand;
use crate::account::models::LoginName;
use crate::account::models::LoginOutcome;
use crate::account::ports::AccountRepository;
use crate::account::ports::LoginServicePort;

/// Domain service implementation for the login use case.
///
/// Looks the account up, verifies the secret and issues a token. Argon2 work
/// runs on the blocking pool.
pub struct LoginService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> LoginService<AR>
where
    AR: AccountRepository,
{
    /// Create a new login service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account store
    /// * `authenticator` - Password verification and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Reject without revealing that the account does not exist.
    async fn reject_unknown(&self, secret: String) -> LoginError {
        let authenticator = Arc::clone(&self.authenticator);
        let _ = tokio::task::spawn_blocking(move || authenticator.reject_unknown_account(&secret))
            .await;

        LoginError::CredentialInvalid
    }
}

#[async_trait]
impl<AR> LoginServicePort for LoginService<AR>
where
    AR: AccountRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError> {
        let LoginCommand { credential, origin } = command;

        let login_name = match LoginName::new(credential.login_name) {
            Ok(login_name) => login_name,
            Err(e) => {
                tracing::info!(reason = %e, "Login rejected");
                return Err(self.reject_unknown(credential.secret).await);
            }
        };

        let account = self
            .repository
            .find_by_login_name(&login_name)
            .await
            .map_err(|e| {
                tracing::error!(login_name = %login_name, error = %e, "Account lookup failed");
                LoginError::Unavailable(e.to_string())
            })?;

        let Some(account) = account else {
            tracing::info!(login_name = %login_name, "Login rejected");
            return Err(self.reject_unknown(credential.secret).await);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let secret = credential.secret;
        let origin = origin.map(|ip| ip.to_string());
        let account_id = account.id.to_string();
        let password_hash = account.password_hash;

        let result = tokio::task::spawn_blocking(move || {
            let subject = TokenSubject {
                account_id: &account_id,
                login_name: login_name.as_str(),
                role: DEFAULT_ROLE,
                origin: origin.as_deref(),
            };

            authenticator
                .authenticate(&secret, &password_hash, &subject)
                .map(|result| (result, login_name))
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Authentication task failed");
            LoginError::Unavailable(e.to_string())
        })?;

        match result {
            Ok((result, login_name)) => {
                tracing::info!(login_name = %login_name, account_id = %account.id, "Login succeeded");
                Ok(LoginOutcome {
                    token: result.access_token,
                    login_name,
                    expires_in: self.authenticator.token_ttl(),
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(account_id = %account.id, "Login rejected");
                Err(LoginError::CredentialInvalid)
            }
            Err(e @ AuthenticationError::Password(_)) => {
                tracing::error!(account_id = %account.id, error = %e, "Stored password hash is unusable");
                Err(LoginError::Unavailable(e.to_string()))
            }
            Err(e @ AuthenticationError::Signing(_)) => {
                tracing::error!(account_id = %account.id, error = %e, "Token signing failed");
                Err(LoginError::Unavailable(e.to_string()))
            }
        }
    }
}
