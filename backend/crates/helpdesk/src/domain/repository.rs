//! Repository Traits
//!
//! Method names carry the entity so that one store type can implement every
//! trait without call-site ambiguity.

use auth::models::Email;
use kernel::id::{AccountId, IncidentTypeId, KpiId, RequestTypeId, TechnicianId, TicketId};

use crate::domain::entity::{
    IncidentType, Kpi, RequestType, ServiceRequest, Technician, Ticket,
};
use crate::error::HelpdeskResult;

#[trait_variant::make(IncidentTypeRepository: Send)]
pub trait LocalIncidentTypeRepository {
    /// Duplicate names yield `Duplicate`
    async fn create_incident_type(&self, incident_type: &IncidentType) -> HelpdeskResult<()>;

    async fn list_incident_types(&self) -> HelpdeskResult<Vec<IncidentType>>;

    async fn find_incident_type(&self, id: &IncidentTypeId) -> HelpdeskResult<Option<IncidentType>>;

    async fn update_incident_type(&self, incident_type: &IncidentType) -> HelpdeskResult<()>;

    /// Tickets filed under the type keep existing without one
    async fn delete_incident_type(&self, id: &IncidentTypeId) -> HelpdeskResult<bool>;
}

#[trait_variant::make(TechnicianRepository: Send)]
pub trait LocalTechnicianRepository {
    /// Duplicate emails yield `Duplicate`
    async fn create_technician(&self, technician: &Technician) -> HelpdeskResult<()>;

    async fn list_technicians(&self) -> HelpdeskResult<Vec<Technician>>;

    async fn find_technician(&self, id: &TechnicianId) -> HelpdeskResult<Option<Technician>>;

    async fn technician_email_exists(&self, email: &Email) -> HelpdeskResult<bool>;

    async fn update_technician(&self, technician: &Technician) -> HelpdeskResult<()>;

    /// Assigned tickets become unassigned
    async fn delete_technician(&self, id: &TechnicianId) -> HelpdeskResult<bool>;
}

#[trait_variant::make(TicketRepository: Send)]
pub trait LocalTicketRepository {
    async fn create_ticket(&self, ticket: &Ticket) -> HelpdeskResult<()>;

    async fn list_tickets_for_owner(&self, owner_id: &AccountId) -> HelpdeskResult<Vec<Ticket>>;

    async fn find_ticket(&self, id: &TicketId) -> HelpdeskResult<Option<Ticket>>;

    async fn update_ticket(&self, ticket: &Ticket) -> HelpdeskResult<()>;

    async fn delete_ticket(&self, id: &TicketId) -> HelpdeskResult<bool>;
}

#[trait_variant::make(KpiRepository: Send)]
pub trait LocalKpiRepository {
    async fn create_kpi(&self, kpi: &Kpi) -> HelpdeskResult<()>;

    async fn list_kpis(&self) -> HelpdeskResult<Vec<Kpi>>;

    async fn find_kpi(&self, id: &KpiId) -> HelpdeskResult<Option<Kpi>>;

    async fn delete_kpi(&self, id: &KpiId) -> HelpdeskResult<bool>;
}

#[trait_variant::make(RequestRepository: Send)]
pub trait LocalRequestRepository {
    async fn create_request_type(&self, request_type: &RequestType) -> HelpdeskResult<()>;

    async fn list_request_types(&self) -> HelpdeskResult<Vec<RequestType>>;

    async fn find_request_type(&self, id: &RequestTypeId) -> HelpdeskResult<Option<RequestType>>;

    async fn create_request(&self, request: &ServiceRequest) -> HelpdeskResult<()>;

    /// All requests, or those of one type
    async fn list_requests(
        &self,
        request_type_id: Option<&RequestTypeId>,
    ) -> HelpdeskResult<Vec<ServiceRequest>>;
}

/// Everything the help-desk routes need from storage.
pub trait HelpdeskStore:
    IncidentTypeRepository
    + TechnicianRepository
    + TicketRepository
    + KpiRepository
    + RequestRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> HelpdeskStore for T where
    T: IncidentTypeRepository
        + TechnicianRepository
        + TicketRepository
        + KpiRepository
        + RequestRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
