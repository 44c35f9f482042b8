//! Technician Service
//!
//! Registering a technician also makes sure an account exists for the same
//! email, so the technician can log in.

use std::sync::Arc;

use auth::application::credentials::{CredentialStore, ProfileInput};
use auth::domain::repository::AccountRepository;
use auth::models::{Account, Email};
use kernel::id::TechnicianId;
use kernel::text;

use crate::domain::entity::Technician;
use crate::domain::repository::TechnicianRepository;
use crate::error::{HelpdeskError, HelpdeskResult};

const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct TechnicianInput {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub national_id: String,
    /// Only used when no account exists yet for `email`
    pub password: Option<String>,
}

pub struct TechnicianRegistration {
    pub technician: Technician,
    pub account: Account,
    pub account_created: bool,
}

pub struct TechnicianService<R, A>
where
    R: TechnicianRepository,
    A: AccountRepository,
{
    repo: Arc<R>,
    accounts: Arc<A>,
}

impl<R, A> TechnicianService<R, A>
where
    R: TechnicianRepository,
    A: AccountRepository,
{
    pub fn new(repo: Arc<R>, accounts: Arc<A>) -> Self {
        Self { repo, accounts }
    }

    pub async fn register(&self, input: TechnicianInput) -> HelpdeskResult<TechnicianRegistration> {
        if [&input.name, &input.last_name, &input.email, &input.national_id]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(HelpdeskError::Validation("Missing required fields".to_string()));
        }

        let name = text::required("name", &input.name, NAME_MAX_LENGTH)?;
        let last_name = text::required("lastName", &input.last_name, NAME_MAX_LENGTH)?;
        let email = Email::new(&input.email)?;

        if self.repo.technician_email_exists(&email).await? {
            return Err(HelpdeskError::Duplicate("Technician"));
        }

        let (account, account_created) = CredentialStore::new(self.accounts.clone())
            .find_or_register(
                email.as_str(),
                input.password,
                ProfileInput {
                    first_name: Some(name.clone()),
                    last_name: Some(last_name.clone()),
                    national_id: Some(input.national_id),
                },
            )
            .await?;

        let technician = Technician::new(format!("{name} {last_name}"), email, account.account_id);
        self.repo.create_technician(&technician).await?;

        tracing::info!(
            technician_id = %technician.technician_id,
            account_id = %account.account_id,
            account_created,
            "Technician registered"
        );

        Ok(TechnicianRegistration {
            technician,
            account,
            account_created,
        })
    }

    pub async fn list(&self) -> HelpdeskResult<Vec<Technician>> {
        self.repo.list_technicians().await
    }

    pub async fn get(&self, id: &TechnicianId) -> HelpdeskResult<Technician> {
        self.repo
            .find_technician(id)
            .await?
            .ok_or(HelpdeskError::NotFound("Technician"))
    }

    /// Blank or absent fields keep their current value.
    pub async fn update(
        &self,
        id: &TechnicianId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> HelpdeskResult<Technician> {
        let mut technician = self.get(id).await?;

        let name = text::optional("name", name, 2 * NAME_MAX_LENGTH + 1)?;
        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(raw) => Some(Email::new(raw)?),
            None => None,
        };

        if let Some(new_email) = &email
            && new_email != &technician.email
            && self.repo.technician_email_exists(new_email).await?
        {
            return Err(HelpdeskError::Duplicate("Technician"));
        }

        technician.apply_changes(name, email);
        self.repo.update_technician(&technician).await?;

        Ok(technician)
    }

    pub async fn delete(&self, id: &TechnicianId) -> HelpdeskResult<()> {
        if !self.repo.delete_technician(id).await? {
            return Err(HelpdeskError::NotFound("Technician"));
        }
        tracing::info!(technician_id = %id, "Technician deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryHelpdeskRepository;
    use auth::InMemoryAccountRepository;
    use auth::application::credentials::RegisterInput;

    type Service = TechnicianService<InMemoryHelpdeskRepository, InMemoryAccountRepository>;

    fn setup() -> (Service, Arc<InMemoryAccountRepository>) {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let service = TechnicianService::new(
            Arc::new(InMemoryHelpdeskRepository::new()),
            accounts.clone(),
        );
        (service, accounts)
    }

    fn input(email: &str, password: Option<&str>) -> TechnicianInput {
        TechnicianInput {
            name: "Luis".to_string(),
            last_name: "Mora".to_string(),
            email: email.to_string(),
            national_id: "0102345678".to_string(),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_register_creates_account() {
        let (service, accounts) = setup();
        let registration = service
            .register(input("luis@x.com", Some("pw123")))
            .await
            .unwrap();

        assert!(registration.account_created);
        assert_eq!(registration.technician.name, "Luis Mora");
        assert_eq!(registration.technician.account_id, registration.account.account_id);
        assert_eq!(registration.account.profile.first_name.as_deref(), Some("Luis"));
        assert_eq!(accounts.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_reuses_existing_account() {
        let (service, accounts) = setup();
        let existing = CredentialStore::new(accounts.clone())
            .register(RegisterInput {
                email: "luis@x.com".to_string(),
                password: "pw123".to_string(),
                profile: ProfileInput::default(),
            })
            .await
            .unwrap();

        let registration = service.register(input("Luis@X.com", None)).await.unwrap();
        assert!(!registration.account_created);
        assert_eq!(registration.account.account_id, existing.account_id);
        // Existing account is returned untouched
        assert_eq!(registration.account.profile.first_name, None);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (service, accounts) = setup();

        let mut missing = input("luis@x.com", Some("pw123"));
        missing.national_id = " ".to_string();
        assert!(matches!(
            service.register(missing).await,
            Err(HelpdeskError::Validation(msg)) if msg == "Missing required fields"
        ));

        // New account without a password
        assert!(matches!(
            service.register(input("luis@x.com", None)).await,
            Err(HelpdeskError::Account(_))
        ));
        assert_eq!(accounts.len().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_technician_email() {
        let (service, _) = setup();
        service.register(input("luis@x.com", Some("pw123"))).await.unwrap();
        assert!(matches!(
            service.register(input("luis@x.com", None)).await,
            Err(HelpdeskError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, _) = setup();
        let first = service.register(input("luis@x.com", Some("pw123"))).await.unwrap();
        service.register(input("eva@x.com", Some("pw123"))).await.unwrap();
        let id = first.technician.technician_id;

        let updated = service.update(&id, Some("Luis M."), None).await.unwrap();
        assert_eq!(updated.name, "Luis M.");
        assert_eq!(updated.email.as_str(), "luis@x.com");

        assert!(matches!(
            service.update(&id, None, Some("eva@x.com")).await,
            Err(HelpdeskError::Duplicate(_))
        ));

        service.delete(&id).await.unwrap();
        assert!(matches!(service.get(&id).await, Err(HelpdeskError::NotFound(_))));
    }
}
