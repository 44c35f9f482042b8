//! Profile Use Case
//!
//! Read and maintain an existing account.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::credentials::ProfileInput;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, account_id: &AccountId) -> AuthResult<Account> {
        self.repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    /// Apply the non-blank fields of `input`.
    pub async fn update(&self, account_id: &AccountId, input: ProfileInput) -> AuthResult<Account> {
        let changes = input.validate()?;
        let mut account = self.get(account_id).await?;

        account.apply_profile(changes);
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Profile updated");
        Ok(account)
    }

    /// Re-hash after checking the current password.
    pub async fn change_password(
        &self,
        account_id: &AccountId,
        current_password: String,
        new_password: String,
    ) -> AuthResult<()> {
        let mut account = self.get(account_id).await?;

        let current = RawPassword::new(current_password).map_err(|_| AuthError::AuthFailure)?;
        if !account.password.verify(&current) {
            return Err(AuthError::AuthFailure);
        }

        let new_password = RawPassword::new(new_password)?;
        account.change_password(UserPassword::from_raw(&new_password)?);
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Password changed");
        Ok(())
    }

    /// Remove an account; linked technicians and tickets go with it.
    pub async fn delete(&self, account_id: &AccountId) -> AuthResult<()> {
        if !self.repo.delete(account_id).await? {
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!(account_id = %account_id, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::credentials::{CredentialStore, RegisterInput};
    use crate::infra::memory::InMemoryAccountRepository;

    async fn setup() -> (Arc<InMemoryAccountRepository>, Account) {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let account = CredentialStore::new(repo.clone())
            .register(RegisterInput {
                email: "a@x.com".to_string(),
                password: "pw123".to_string(),
                profile: ProfileInput::default(),
            })
            .await
            .unwrap();
        (repo, account)
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (repo, account) = setup().await;
        let use_case = ProfileUseCase::new(repo);

        let updated = use_case
            .update(
                &account.account_id,
                ProfileInput {
                    first_name: Some(" Ana ".to_string()),
                    last_name: Some(String::new()),
                    national_id: Some("0102345678".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.profile.first_name.as_deref(), Some("Ana"));
        assert_eq!(updated.profile.last_name, None);
        assert_eq!(
            use_case.get(&account.account_id).await.unwrap().profile,
            updated.profile
        );
    }

    #[tokio::test]
    async fn test_change_password() {
        let (repo, account) = setup().await;
        let use_case = ProfileUseCase::new(repo.clone());
        let store = CredentialStore::new(repo);

        let err = use_case
            .change_password(&account.account_id, "nope".to_string(), "pw456".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AuthFailure));

        use_case
            .change_password(&account.account_id, "pw123".to_string(), "pw456".to_string())
            .await
            .unwrap();
        assert!(store.verify("a@x.com", "pw123".to_string()).await.is_err());
        assert!(store.verify("a@x.com", "pw456".to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, account) = setup().await;
        let use_case = ProfileUseCase::new(repo);

        use_case.delete(&account.account_id).await.unwrap();
        assert!(matches!(
            use_case.get(&account.account_id).await,
            Err(AuthError::AccountNotFound)
        ));
        assert!(matches!(
            use_case.delete(&account.account_id).await,
            Err(AuthError::AccountNotFound)
        ));
    }
}
