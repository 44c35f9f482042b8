//! In-memory help desk store
//!
//! Mirrors the PostgreSQL constraints callers rely on: unique incident type
//! names and technician emails, and `ON DELETE SET NULL` for ticket references.

use std::collections::HashMap;
use std::sync::Arc;

use auth::models::Email;
use kernel::id::{AccountId, IncidentTypeId, KpiId, RequestTypeId, TechnicianId, TicketId};
use tokio::sync::RwLock;

use crate::domain::entity::{IncidentType, Kpi, RequestType, ServiceRequest, Technician, Ticket};
use crate::domain::repository::{
    IncidentTypeRepository, KpiRepository, RequestRepository, TechnicianRepository,
    TicketRepository,
};
use crate::error::{HelpdeskError, HelpdeskResult};

#[derive(Default)]
struct Tables {
    incident_types: HashMap<IncidentTypeId, IncidentType>,
    technicians: HashMap<TechnicianId, Technician>,
    tickets: HashMap<TicketId, Ticket>,
    kpis: HashMap<KpiId, Kpi>,
    request_types: HashMap<RequestTypeId, RequestType>,
    requests: Vec<ServiceRequest>,
}

#[derive(Clone, Default)]
pub struct InMemoryHelpdeskRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryHelpdeskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn ticket_count(&self) -> usize {
        self.tables.read().await.tickets.len()
    }

    pub async fn request_count(&self) -> usize {
        self.tables.read().await.requests.len()
    }
}

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

impl IncidentTypeRepository for InMemoryHelpdeskRepository {
    async fn create_incident_type(&self, incident_type: &IncidentType) -> HelpdeskResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .incident_types
            .values()
            .any(|t| t.type_name == incident_type.type_name)
        {
            return Err(HelpdeskError::Duplicate("Incident type"));
        }
        tables
            .incident_types
            .insert(incident_type.incident_type_id, incident_type.clone());
        Ok(())
    }

    async fn list_incident_types(&self) -> HelpdeskResult<Vec<IncidentType>> {
        let items = self.tables.read().await.incident_types.values().cloned().collect();
        Ok(sorted_by(items, |t: &IncidentType| t.type_name.clone()))
    }

    async fn find_incident_type(&self, id: &IncidentTypeId) -> HelpdeskResult<Option<IncidentType>> {
        Ok(self.tables.read().await.incident_types.get(id).cloned())
    }

    async fn update_incident_type(&self, incident_type: &IncidentType) -> HelpdeskResult<()> {
        let mut tables = self.tables.write().await;
        if tables.incident_types.values().any(|t| {
            t.incident_type_id != incident_type.incident_type_id
                && t.type_name == incident_type.type_name
        }) {
            return Err(HelpdeskError::Duplicate("Incident type"));
        }
        if let Some(stored) = tables.incident_types.get_mut(&incident_type.incident_type_id) {
            *stored = incident_type.clone();
        }
        Ok(())
    }

    async fn delete_incident_type(&self, id: &IncidentTypeId) -> HelpdeskResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.incident_types.remove(id).is_none() {
            return Ok(false);
        }
        for ticket in tables.tickets.values_mut() {
            if ticket.incident_type_id.as_ref() == Some(id) {
                ticket.incident_type_id = None;
            }
        }
        Ok(true)
    }
}

impl TechnicianRepository for InMemoryHelpdeskRepository {
    async fn create_technician(&self, technician: &Technician) -> HelpdeskResult<()> {
        let mut tables = self.tables.write().await;
        if tables.technicians.values().any(|t| t.email == technician.email) {
            return Err(HelpdeskError::Duplicate("Technician"));
        }
        tables
            .technicians
            .insert(technician.technician_id, technician.clone());
        Ok(())
    }

    async fn list_technicians(&self) -> HelpdeskResult<Vec<Technician>> {
        let items = self.tables.read().await.technicians.values().cloned().collect();
        Ok(sorted_by(items, |t: &Technician| t.name.clone()))
    }

    async fn find_technician(&self, id: &TechnicianId) -> HelpdeskResult<Option<Technician>> {
        Ok(self.tables.read().await.technicians.get(id).cloned())
    }

    async fn technician_email_exists(&self, email: &Email) -> HelpdeskResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .technicians
            .values()
            .any(|t| &t.email == email))
    }

    async fn update_technician(&self, technician: &Technician) -> HelpdeskResult<()> {
        let mut tables = self.tables.write().await;
        if tables.technicians.values().any(|t| {
            t.technician_id != technician.technician_id && t.email == technician.email
        }) {
            return Err(HelpdeskError::Duplicate("Technician"));
        }
        if let Some(stored) = tables.technicians.get_mut(&technician.technician_id) {
            *stored = technician.clone();
        }
        Ok(())
    }

    async fn delete_technician(&self, id: &TechnicianId) -> HelpdeskResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.technicians.remove(id).is_none() {
            return Ok(false);
        }
        for ticket in tables.tickets.values_mut() {
            if ticket.technician_id.as_ref() == Some(id) {
                ticket.technician_id = None;
            }
        }
        Ok(true)
    }
}

impl TicketRepository for InMemoryHelpdeskRepository {
    async fn create_ticket(&self, ticket: &Ticket) -> HelpdeskResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .tickets
            .values()
            .any(|t| t.identifier == ticket.identifier)
        {
            return Err(HelpdeskError::Duplicate("Ticket identifier"));
        }
        tables.tickets.insert(ticket.ticket_id, ticket.clone());
        Ok(())
    }

    async fn list_tickets_for_owner(&self, owner_id: &AccountId) -> HelpdeskResult<Vec<Ticket>> {
        let items: Vec<Ticket> = self
            .tables
            .read()
            .await
            .tickets
            .values()
            .filter(|t| t.is_owned_by(owner_id))
            .cloned()
            .collect();
        Ok(sorted_by(items, |t: &Ticket| std::cmp::Reverse(t.created_at)))
    }

    async fn find_ticket(&self, id: &TicketId) -> HelpdeskResult<Option<Ticket>> {
        Ok(self.tables.read().await.tickets.get(id).cloned())
    }

    async fn update_ticket(&self, ticket: &Ticket) -> HelpdeskResult<()> {
        if let Some(stored) = self.tables.write().await.tickets.get_mut(&ticket.ticket_id) {
            *stored = ticket.clone();
        }
        Ok(())
    }

    async fn delete_ticket(&self, id: &TicketId) -> HelpdeskResult<bool> {
        Ok(self.tables.write().await.tickets.remove(id).is_some())
    }
}

impl KpiRepository for InMemoryHelpdeskRepository {
    async fn create_kpi(&self, kpi: &Kpi) -> HelpdeskResult<()> {
        self.tables.write().await.kpis.insert(kpi.kpi_id, kpi.clone());
        Ok(())
    }

    async fn list_kpis(&self) -> HelpdeskResult<Vec<Kpi>> {
        let items = self.tables.read().await.kpis.values().cloned().collect();
        Ok(sorted_by(items, |k: &Kpi| {
            (std::cmp::Reverse(k.measurement_date), k.name.clone())
        }))
    }

    async fn find_kpi(&self, id: &KpiId) -> HelpdeskResult<Option<Kpi>> {
        Ok(self.tables.read().await.kpis.get(id).cloned())
    }

    async fn delete_kpi(&self, id: &KpiId) -> HelpdeskResult<bool> {
        Ok(self.tables.write().await.kpis.remove(id).is_some())
    }
}

impl RequestRepository for InMemoryHelpdeskRepository {
    async fn create_request_type(&self, request_type: &RequestType) -> HelpdeskResult<()> {
        self.tables
            .write()
            .await
            .request_types
            .insert(request_type.request_type_id, request_type.clone());
        Ok(())
    }

    async fn list_request_types(&self) -> HelpdeskResult<Vec<RequestType>> {
        let items = self.tables.read().await.request_types.values().cloned().collect();
        Ok(sorted_by(items, |t: &RequestType| t.name.clone()))
    }

    async fn find_request_type(&self, id: &RequestTypeId) -> HelpdeskResult<Option<RequestType>> {
        Ok(self.tables.read().await.request_types.get(id).cloned())
    }

    async fn create_request(&self, request: &ServiceRequest) -> HelpdeskResult<()> {
        let mut tables = self.tables.write().await;
        // Same guarantee as the RESTRICT foreign key
        if !tables.request_types.contains_key(&request.request_type_id) {
            return Err(HelpdeskError::UnknownReference("request type"));
        }
        tables.requests.push(request.clone());
        Ok(())
    }

    async fn list_requests(
        &self,
        request_type_id: Option<&RequestTypeId>,
    ) -> HelpdeskResult<Vec<ServiceRequest>> {
        let items: Vec<ServiceRequest> = self
            .tables
            .read()
            .await
            .requests
            .iter()
            .filter(|r| request_type_id.is_none_or(|id| &r.request_type_id == id))
            .cloned()
            .collect();
        Ok(sorted_by(items, |r: &ServiceRequest| std::cmp::Reverse(r.created_at)))
    }
}
