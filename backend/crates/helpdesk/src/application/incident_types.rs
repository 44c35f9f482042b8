//! Incident Type Service

use std::sync::Arc;

use kernel::id::IncidentTypeId;
use kernel::text;

use crate::domain::entity::IncidentType;
use crate::domain::repository::IncidentTypeRepository;
use crate::error::{HelpdeskError, HelpdeskResult};

const TYPE_NAME_MAX_LENGTH: usize = 100;

pub struct IncidentTypeService<R>
where
    R: IncidentTypeRepository,
{
    repo: Arc<R>,
}

impl<R> IncidentTypeService<R>
where
    R: IncidentTypeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, type_name: &str) -> HelpdeskResult<IncidentType> {
        let type_name = text::required("type", type_name, TYPE_NAME_MAX_LENGTH)?;
        let incident_type = IncidentType::new(type_name);

        self.repo.create_incident_type(&incident_type).await?;

        tracing::info!(
            incident_type_id = %incident_type.incident_type_id,
            type_name = %incident_type.type_name,
            "Incident type created"
        );
        Ok(incident_type)
    }

    pub async fn list(&self) -> HelpdeskResult<Vec<IncidentType>> {
        self.repo.list_incident_types().await
    }

    /// A blank or absent name keeps the current one.
    pub async fn update(
        &self,
        id: &IncidentTypeId,
        type_name: Option<&str>,
    ) -> HelpdeskResult<IncidentType> {
        let mut incident_type = self
            .repo
            .find_incident_type(id)
            .await?
            .ok_or(HelpdeskError::NotFound("Incident type"))?;

        if let Some(type_name) = text::optional("type", type_name, TYPE_NAME_MAX_LENGTH)? {
            incident_type.rename(type_name);
            self.repo.update_incident_type(&incident_type).await?;
        }

        Ok(incident_type)
    }

    pub async fn delete(&self, id: &IncidentTypeId) -> HelpdeskResult<()> {
        if !self.repo.delete_incident_type(id).await? {
            return Err(HelpdeskError::NotFound("Incident type"));
        }
        tracing::info!(incident_type_id = %id, "Incident type deleted");
        Ok(())
    }
}
