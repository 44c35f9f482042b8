//! Credential Store
//!
//! Registration and password verification on top of [`AccountRepository`].

use std::sync::Arc;

use kernel::text;

use crate::domain::entity::account::{Account, AccountProfile};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    email::Email,
    national_id::NationalId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

const NAME_MAX_LENGTH: usize = 100;

/// Unvalidated profile fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<String>,
}

impl ProfileInput {
    /// Blank fields count as absent.
    pub fn validate(&self) -> AuthResult<AccountProfile> {
        Ok(AccountProfile {
            first_name: text::optional("firstName", self.first_name.as_deref(), NAME_MAX_LENGTH)?,
            last_name: text::optional("lastName", self.last_name.as_deref(), NAME_MAX_LENGTH)?,
            national_id: NationalId::optional(self.national_id.as_deref())?,
        })
    }
}

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub profile: ProfileInput,
}

pub struct CredentialStore<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> CredentialStore<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create an account. The stored record never holds the clear text.
    pub async fn register(&self, input: RegisterInput) -> AuthResult<Account> {
        let email = Email::new(input.email)?;
        let profile = input.profile.validate()?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateIdentity);
        }

        let password = UserPassword::from_raw(&raw_password)?;
        let account = Account::new(email, password, profile);

        // A concurrent registration can still win the race; the unique
        // constraint turns that into DuplicateIdentity as well.
        self.repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Account registered"
        );

        Ok(account)
    }

    /// Check an email/password pair.
    ///
    /// Every failure is `AuthFailure`, including malformed input, and an
    /// unknown email costs one Argon2 verification like a wrong password.
    pub async fn verify(&self, email: &str, password: String) -> AuthResult<Account> {
        let Ok(raw_password) = RawPassword::new(password) else {
            return Err(AuthError::AuthFailure);
        };

        let account = match Email::new(email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        match account {
            Some(account) if account.password.verify(&raw_password) => Ok(account),
            Some(_) => Err(AuthError::AuthFailure),
            None => {
                raw_password.verify_against_nothing();
                Err(AuthError::AuthFailure)
            }
        }
    }

    /// Return the account registered under `email`, or register one.
    ///
    /// An existing account is returned untouched (`false`); creating one
    /// requires a password (`true`).
    pub async fn find_or_register(
        &self,
        email: &str,
        password: Option<String>,
        profile: ProfileInput,
    ) -> AuthResult<(Account, bool)> {
        let parsed = Email::new(email)?;
        if let Some(existing) = self.repo.find_by_email(&parsed).await? {
            return Ok((existing, false));
        }

        let Some(password) = password.filter(|p| !p.trim().is_empty()) else {
            return Err(AuthError::Validation(
                "Password is required to create the user account".to_string(),
            ));
        };

        let account = self
            .register(RegisterInput {
                email: parsed.into_db(),
                password,
                profile,
            })
            .await?;

        Ok((account, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAccountRepository;

    fn store() -> CredentialStore<InMemoryAccountRepository> {
        CredentialStore::new(Arc::new(InMemoryAccountRepository::new()))
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            profile: ProfileInput::default(),
        }
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let store = store();
        let account = store.register(input("a@x.com", "pw123")).await.unwrap();
        assert!(account.password.as_phc_string().starts_with("$argon2id$"));

        let verified = store.verify("a@x.com", "pw123".to_string()).await.unwrap();
        assert_eq!(verified.account_id, account.account_id);

        // Lookup is case-insensitive because the identity is normalized
        assert!(store.verify("A@X.COM", "pw123".to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_fail_alike() {
        let store = store();
        store.register(input("a@x.com", "pw123")).await.unwrap();

        let wrong = store.verify("a@x.com", "pw124".to_string()).await.unwrap_err();
        let unknown = store.verify("b@x.com", "pw123".to_string()).await.unwrap_err();
        assert!(matches!(wrong, AuthError::AuthFailure));
        assert!(matches!(unknown, AuthError::AuthFailure));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_malformed_login_input_is_auth_failure() {
        let store = store();
        assert!(matches!(
            store.verify("not-an-email", "pw123".to_string()).await,
            Err(AuthError::AuthFailure)
        ));
        assert!(matches!(
            store.verify("a@x.com", String::new()).await,
            Err(AuthError::AuthFailure)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_original() {
        let store = store();
        let original = store.register(input("a@x.com", "pw123")).await.unwrap();

        let err = store.register(input("A@x.com", "other")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity));

        // The original password still works, the second one never took effect
        let verified = store.verify("a@x.com", "pw123".to_string()).await.unwrap();
        assert_eq!(verified.account_id, original.account_id);
        assert!(store.verify("a@x.com", "other".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_register_validation() {
        let store = store();
        assert!(matches!(
            store.register(input("bad", "pw123")).await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            store.register(input("a@x.com", "   ")).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_find_or_register() {
        let store = store();
        let profile = ProfileInput {
            first_name: Some("Luis".to_string()),
            last_name: Some("Mora".to_string()),
            national_id: None,
        };

        let err = store
            .find_or_register("tech@x.com", None, profile.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let (created, was_created) = store
            .find_or_register("tech@x.com", Some("pw123".to_string()), profile.clone())
            .await
            .unwrap();
        assert!(was_created);
        assert_eq!(created.profile.first_name.as_deref(), Some("Luis"));

        let (found, was_created) = store
            .find_or_register("TECH@x.com", None, ProfileInput::default())
            .await
            .unwrap();
        assert!(!was_created);
        assert_eq!(found.account_id, created.account_id);
    }
}
