//! Login Use Case
//!
//! Verifies credentials and issues a session token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::CredentialStore;
use crate::application::session_token::{IssuedToken, TokenIssuer};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;

pub struct LoginOutput {
    pub token: IssuedToken,
    pub account: Account,
}

pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    credentials: CredentialStore<R>,
    issuer: TokenIssuer,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialStore::new(repo),
            issuer: TokenIssuer::new(config),
        }
    }

    pub async fn execute(&self, email: &str, password: String) -> AuthResult<LoginOutput> {
        let account = self.credentials.verify(email, password).await?;
        let token = self.issuer.issue(&account)?;

        tracing::info!(account_id = %account.account_id, "User logged in");

        Ok(LoginOutput { token, account })
    }
}
