//! API DTOs (Data Transfer Objects)
//!
//! Ids arriving in bodies or query strings are taken as strings and parsed
//! by the handlers, so a malformed id is a 400 with the usual error body.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use auth::models::AccountResponse;

use crate::application::kpis::KpiInput;
use crate::domain::entity::{IncidentType, Kpi, RequestType, ServiceRequest, Technician, Ticket};
use crate::domain::value_object::{
    percentage::{KpiStatus, Percentage},
    ticket_status::TicketStatus,
};

// ============================================================================
// Incident Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIncidentTypeRequest {
    #[serde(rename = "type", default)]
    pub type_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIncidentTypeRequest {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentTypeResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&IncidentType> for IncidentTypeResponse {
    fn from(incident_type: &IncidentType) -> Self {
        Self {
            id: incident_type.incident_type_id.into_uuid(),
            type_name: incident_type.type_name.clone(),
            created_at: incident_type.created_at,
            updated_at: incident_type.updated_at,
        }
    }
}

// ============================================================================
// Technicians
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTechnicianRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "cedula")]
    pub national_id: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTechnicianRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Technician> for TechnicianResponse {
    fn from(technician: &Technician) -> Self {
        Self {
            id: technician.technician_id.into_uuid(),
            name: technician.name.clone(),
            email: technician.email.to_string(),
            user_id: technician.account_id.into_uuid(),
            created_at: technician.created_at,
            updated_at: technician.updated_at,
        }
    }
}

/// Body of `POST /technicians`
#[derive(Debug, Clone, Serialize)]
pub struct TechnicianCreatedResponse {
    pub message: String,
    pub technician: TechnicianResponse,
    pub user: AccountResponse,
}

// ============================================================================
// Tickets
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "incidentTypeId")]
    pub incident_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub technician_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: Uuid,
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub user_id: Uuid,
    pub technician_id: Option<Uuid>,
    pub incident_type_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.ticket_id.into_uuid(),
            identifier: ticket.identifier.to_string(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status,
            user_id: ticket.owner_id.into_uuid(),
            technician_id: ticket.technician_id.map(|id| id.into_uuid()),
            incident_type_id: ticket.incident_type_id.map(|id| id.into_uuid()),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

// ============================================================================
// KPIs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKpiRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub methodology: String,
    pub indicator_percentage: Option<f64>,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub measurement_date: String,
    pub achieved_percentage: Option<f64>,
}

impl From<CreateKpiRequest> for KpiInput {
    fn from(req: CreateKpiRequest) -> Self {
        Self {
            name: req.name,
            methodology: req.methodology,
            indicator_percentage: req.indicator_percentage,
            frequency: req.frequency,
            measurement_date: req.measurement_date,
            achieved_percentage: req.achieved_percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    pub id: Uuid,
    pub name: String,
    pub methodology: String,
    pub indicator_percentage: Percentage,
    pub frequency: String,
    pub measurement_date: NaiveDate,
    pub achieved_percentage: Percentage,
    pub status: KpiStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Kpi> for KpiResponse {
    fn from(kpi: &Kpi) -> Self {
        Self {
            id: kpi.kpi_id.into_uuid(),
            name: kpi.name.clone(),
            methodology: kpi.methodology.clone(),
            indicator_percentage: kpi.indicator_percentage,
            frequency: kpi.frequency.clone(),
            measurement_date: kpi.measurement_date,
            achieved_percentage: kpi.achieved_percentage,
            status: kpi.status,
            created_at: kpi.created_at,
            updated_at: kpi.updated_at,
        }
    }
}

// ============================================================================
// Request Types and Service Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestTypeRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RequestType> for RequestTypeResponse {
    fn from(request_type: &RequestType) -> Self {
        Self {
            id: request_type.request_type_id.into_uuid(),
            name: request_type.name.clone(),
            description: request_type.description.clone(),
            created_at: request_type.created_at,
            updated_at: request_type.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "cedula")]
    pub national_id: String,
    #[serde(default)]
    pub position: String,
    pub request_type_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestResponse {
    pub id: Uuid,
    pub name: String,
    pub national_id: String,
    pub position: String,
    pub request_type_id: Uuid,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ServiceRequest> for ServiceRequestResponse {
    fn from(request: &ServiceRequest) -> Self {
        Self {
            id: request.service_request_id.into_uuid(),
            name: request.requester_name.clone(),
            national_id: request.national_id.as_str().to_string(),
            position: request.position.clone(),
            request_type_id: request.request_type_id.into_uuid(),
            email: request.requester_email.as_ref().map(|e| e.to_string()),
            created_at: request.created_at,
        }
    }
}

/// `GET /requests?typeId=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListQuery {
    pub type_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_type_uses_type_key() {
        let req: CreateIncidentTypeRequest = serde_json::from_str(r#"{"type":"Hardware"}"#).unwrap();
        assert_eq!(req.type_name, "Hardware");

        let response = IncidentTypeResponse::from(&IncidentType::new("Network".to_string()));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "Network");
        assert!(json.get("typeName").is_none());
    }

    #[test]
    fn test_technician_request_accepts_cedula() {
        let req: CreateTechnicianRequest = serde_json::from_str(
            r#"{"name":"Luis","lastName":"Mora","email":"luis@x.com","cedula":"0102345678"}"#,
        )
        .unwrap();
        assert_eq!(req.national_id, "0102345678");
        assert!(req.password.is_none());
    }

    #[test]
    fn test_ticket_request_accepts_both_incident_keys() {
        let a: CreateTicketRequest =
            serde_json::from_str(r#"{"title":"t","description":"d","incidentType":"x"}"#).unwrap();
        let b: CreateTicketRequest =
            serde_json::from_str(r#"{"title":"t","description":"d","incidentTypeId":"x"}"#).unwrap();
        assert_eq!(a.incident_type.as_deref(), Some("x"));
        assert_eq!(b.incident_type.as_deref(), Some("x"));
    }
}
