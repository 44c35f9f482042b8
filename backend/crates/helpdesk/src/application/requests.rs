//! Request Types and Service Requests

use std::sync::Arc;

use auth::models::{Email, NationalId};
use kernel::id::RequestTypeId;
use kernel::text;
use platform::mail::Mailer;

use crate::application::notifications::Notifier;
use crate::domain::entity::{RequestType, ServiceRequest};
use crate::domain::repository::RequestRepository;
use crate::error::{HelpdeskError, HelpdeskResult};

const NAME_MAX_LENGTH: usize = 150;
const DESCRIPTION_MAX_LENGTH: usize = 2000;
const POSITION_MAX_LENGTH: usize = 100;

/// A submission from the public request form
#[derive(Debug, Clone, Default)]
pub struct ServiceRequestInput {
    pub name: String,
    pub national_id: String,
    pub position: String,
    pub request_type_id: Option<RequestTypeId>,
    pub email: Option<String>,
}

pub struct RequestService<R, M>
where
    R: RequestRepository,
    M: Mailer + Sync,
{
    repo: Arc<R>,
    notifier: Notifier<M>,
}

impl<R, M> RequestService<R, M>
where
    R: RequestRepository + Sync,
    M: Mailer + Sync,
{
    pub fn new(repo: Arc<R>, notifier: Notifier<M>) -> Self {
        Self { repo, notifier }
    }

    pub async fn create_type(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> HelpdeskResult<RequestType> {
        let request_type = RequestType::new(
            text::required("name", name, NAME_MAX_LENGTH)?,
            text::optional("description", description, DESCRIPTION_MAX_LENGTH)?,
        );
        self.repo.create_request_type(&request_type).await?;

        tracing::info!(request_type_id = %request_type.request_type_id, "Request type created");
        Ok(request_type)
    }

    pub async fn list_types(&self) -> HelpdeskResult<Vec<RequestType>> {
        self.repo.list_request_types().await
    }

    /// Store the request, then notify the requester and the administrator.
    pub async fn submit(&self, input: ServiceRequestInput) -> HelpdeskResult<ServiceRequest> {
        let name = text::required("name", &input.name, NAME_MAX_LENGTH)?;
        let national_id = NationalId::new(&input.national_id)?;
        let position = text::required("position", &input.position, POSITION_MAX_LENGTH)?;
        let requester_email = match input.email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Email::new(raw)?),
        };

        let request_type_id = input
            .request_type_id
            .ok_or_else(|| HelpdeskError::Validation("requestTypeId is required".to_string()))?;
        let request_type = self
            .repo
            .find_request_type(&request_type_id)
            .await?
            .ok_or(HelpdeskError::UnknownReference("request type"))?;

        let request = ServiceRequest::new(
            name,
            national_id,
            position,
            request_type.request_type_id,
            requester_email,
        );
        self.repo.create_request(&request).await?;

        tracing::info!(
            service_request_id = %request.service_request_id,
            request_type = %request_type.name,
            "Service request submitted"
        );

        self.notifier.request_submitted(&request, &request_type).await;
        Ok(request)
    }

    pub async fn list(
        &self,
        request_type_id: Option<&RequestTypeId>,
    ) -> HelpdeskResult<Vec<ServiceRequest>> {
        self.repo.list_requests(request_type_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::HelpdeskConfig;
    use crate::infra::memory::InMemoryHelpdeskRepository;
    use crate::tests::RecordingMailer;

    type Service = RequestService<InMemoryHelpdeskRepository, RecordingMailer>;

    fn setup(admin_email: Option<&str>) -> (Service, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::default());
        let config = Arc::new(HelpdeskConfig::new(admin_email.map(str::to_string)));
        let service = RequestService::new(
            Arc::new(InMemoryHelpdeskRepository::new()),
            Notifier::new(mailer.clone(), config),
        );
        (service, mailer)
    }

    fn input(request_type_id: Option<RequestTypeId>, email: Option<&str>) -> ServiceRequestInput {
        ServiceRequestInput {
            name: "Marta Ruiz".to_string(),
            national_id: "0102345678".to_string(),
            position: "Accountant".to_string(),
            request_type_id,
            email: email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_submit_notifies_requester_and_admin() {
        let (service, mailer) = setup(Some("admin@x.com"));
        let request_type = service.create_type("New laptop", None).await.unwrap();

        let request = service
            .submit(input(Some(request_type.request_type_id), Some("marta@x.com")))
            .await
            .unwrap();
        assert_eq!(request.request_type_id, request_type.request_type_id);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "marta@x.com");
        assert_eq!(sent[1].to, "admin@x.com");
        assert_eq!(sent[1].subject, "New request submitted");
    }

    #[tokio::test]
    async fn test_submit_without_recipients_sends_nothing() {
        let (service, mailer) = setup(None);
        let request_type = service.create_type("VPN access", Some("Remote work")).await.unwrap();

        service
            .submit(input(Some(request_type.request_type_id), None))
            .await
            .unwrap();
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_or_unknown_type() {
        let (service, mailer) = setup(Some("admin@x.com"));

        assert!(matches!(
            service.submit(input(None, None)).await,
            Err(HelpdeskError::Validation(_))
        ));
        assert!(matches!(
            service.submit(input(Some(RequestTypeId::new()), None)).await,
            Err(HelpdeskError::UnknownReference("request type"))
        ));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_type() {
        let (service, _) = setup(None);
        let laptop = service.create_type("New laptop", None).await.unwrap();
        let vpn = service.create_type("VPN access", None).await.unwrap();

        service.submit(input(Some(laptop.request_type_id), None)).await.unwrap();
        service.submit(input(Some(laptop.request_type_id), None)).await.unwrap();
        service.submit(input(Some(vpn.request_type_id), None)).await.unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 3);
        assert_eq!(service.list(Some(&vpn.request_type_id)).await.unwrap().len(), 1);

        let types = service.list_types().await.unwrap();
        assert_eq!(types[0].name, "New laptop");
    }
}
