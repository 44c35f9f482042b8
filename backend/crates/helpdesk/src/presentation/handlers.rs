//! HTTP Handlers

use std::sync::Arc;

use auth::CallerIdentity;
use auth::domain::repository::AccountRepository;
use auth::models::{AccountResponse, MessageResponse};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{Id, IncidentTypeId, KpiId, RequestTypeId, TechnicianId, TicketId};
use platform::mail::Mailer;

use crate::application::{
    HelpdeskConfig, IncidentTypeService, KpiService, Notifier, RequestService,
    ServiceRequestInput, TechnicianInput, TechnicianService, TicketInput, TicketService,
    TicketUpdateInput,
};
use crate::domain::repository::HelpdeskStore;
use crate::error::{HelpdeskError, HelpdeskResult};
use crate::presentation::dto::{
    CreateIncidentTypeRequest, CreateKpiRequest, CreateRequestTypeRequest,
    CreateTechnicianRequest, CreateTicketRequest, IncidentTypeResponse, KpiResponse,
    RequestListQuery, RequestTypeResponse, ServiceRequestResponse, SubmitRequestRequest,
    TechnicianCreatedResponse, TechnicianResponse, TicketResponse, UpdateIncidentTypeRequest,
    UpdateTechnicianRequest, UpdateTicketRequest,
};

/// Shared state for help desk handlers
#[derive(Clone)]
pub struct HelpdeskAppState<R, A, M>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub accounts: Arc<A>,
    pub mailer: Arc<M>,
    pub config: Arc<HelpdeskConfig>,
}

impl<R, A, M> HelpdeskAppState<R, A, M>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    fn notifier(&self) -> Notifier<M> {
        Notifier::new(self.mailer.clone(), self.config.clone())
    }
}

/// Parse a path, body or query id; malformed ids are a 400.
fn parse_id<T>(raw: &str, what: &str) -> HelpdeskResult<Id<T>> {
    raw.trim()
        .parse()
        .map_err(|_| HelpdeskError::Validation(format!("Invalid {what} id")))
}

/// Like [`parse_id`], but absent or blank means `None`.
fn parse_optional_id<T>(raw: Option<&str>, what: &str) -> HelpdeskResult<Option<Id<T>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_id(raw, what).map(Some),
    }
}

// ============================================================================
// Incident Types
// ============================================================================

/// POST /api/incident-types
pub async fn create_incident_type<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Json(req): Json<CreateIncidentTypeRequest>,
) -> HelpdeskResult<(StatusCode, Json<IncidentTypeResponse>)>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let incident_type = IncidentTypeService::new(state.repo.clone())
        .create(&req.type_name)
        .await?;

    Ok((StatusCode::CREATED, Json(IncidentTypeResponse::from(&incident_type))))
}

/// GET /api/incident-types
pub async fn list_incident_types<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
) -> HelpdeskResult<Json<Vec<IncidentTypeResponse>>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let incident_types = IncidentTypeService::new(state.repo.clone()).list().await?;
    Ok(Json(incident_types.iter().map(IncidentTypeResponse::from).collect()))
}

/// PUT /api/incident-types/{id}
pub async fn update_incident_type<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateIncidentTypeRequest>,
) -> HelpdeskResult<Json<IncidentTypeResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: IncidentTypeId = parse_id(&id, "incident type")?;
    let incident_type = IncidentTypeService::new(state.repo.clone())
        .update(&id, req.type_name.as_deref())
        .await?;

    Ok(Json(IncidentTypeResponse::from(&incident_type)))
}

/// DELETE /api/incident-types/{id}
pub async fn delete_incident_type<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
) -> HelpdeskResult<Json<MessageResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: IncidentTypeId = parse_id(&id, "incident type")?;
    IncidentTypeService::new(state.repo.clone()).delete(&id).await?;

    Ok(Json(MessageResponse::new("Incident type deleted")))
}

// ============================================================================
// Technicians
// ============================================================================

/// POST /api/technicians
pub async fn create_technician<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Json(req): Json<CreateTechnicianRequest>,
) -> HelpdeskResult<(StatusCode, Json<TechnicianCreatedResponse>)>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let registration = TechnicianService::new(state.repo.clone(), state.accounts.clone())
        .register(TechnicianInput {
            name: req.name,
            last_name: req.last_name,
            email: req.email,
            national_id: req.national_id,
            password: req.password,
        })
        .await?;

    let message = if registration.account_created {
        "Technician and user account created"
    } else {
        "Technician created and linked to the existing user account"
    };

    Ok((
        StatusCode::CREATED,
        Json(TechnicianCreatedResponse {
            message: message.to_string(),
            technician: TechnicianResponse::from(&registration.technician),
            user: AccountResponse::from(&registration.account),
        }),
    ))
}

/// GET /api/technicians
pub async fn list_technicians<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
) -> HelpdeskResult<Json<Vec<TechnicianResponse>>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let technicians = TechnicianService::new(state.repo.clone(), state.accounts.clone())
        .list()
        .await?;

    Ok(Json(technicians.iter().map(TechnicianResponse::from).collect()))
}

/// GET /api/technicians/{id}
pub async fn get_technician<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
) -> HelpdeskResult<Json<TechnicianResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: TechnicianId = parse_id(&id, "technician")?;
    let technician = TechnicianService::new(state.repo.clone(), state.accounts.clone())
        .get(&id)
        .await?;

    Ok(Json(TechnicianResponse::from(&technician)))
}

/// PUT /api/technicians/{id}
pub async fn update_technician<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTechnicianRequest>,
) -> HelpdeskResult<Json<TechnicianResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: TechnicianId = parse_id(&id, "technician")?;
    let technician = TechnicianService::new(state.repo.clone(), state.accounts.clone())
        .update(&id, req.name.as_deref(), req.email.as_deref())
        .await?;

    Ok(Json(TechnicianResponse::from(&technician)))
}

/// DELETE /api/technicians/{id}
pub async fn delete_technician<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
) -> HelpdeskResult<Json<MessageResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: TechnicianId = parse_id(&id, "technician")?;
    TechnicianService::new(state.repo.clone(), state.accounts.clone())
        .delete(&id)
        .await?;

    Ok(Json(MessageResponse::new("Technician deleted")))
}

// ============================================================================
// Tickets
// ============================================================================

/// POST /api/tickets
pub async fn create_ticket<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    caller: CallerIdentity,
    Json(req): Json<CreateTicketRequest>,
) -> HelpdeskResult<(StatusCode, Json<TicketResponse>)>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let incident_type_id = parse_optional_id(req.incident_type.as_deref(), "incident type")?;
    let ticket = TicketService::new(state.repo.clone(), state.accounts.clone(), state.notifier())
        .create(
            &caller,
            TicketInput {
                title: req.title,
                description: req.description,
                incident_type_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(&ticket))))
}

/// GET /api/tickets
pub async fn list_tickets<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    caller: CallerIdentity,
) -> HelpdeskResult<Json<Vec<TicketResponse>>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let tickets = TicketService::new(state.repo.clone(), state.accounts.clone(), state.notifier())
        .list(&caller)
        .await?;

    Ok(Json(tickets.iter().map(TicketResponse::from).collect()))
}

/// PUT /api/tickets/{id}
pub async fn update_ticket<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(req): Json<UpdateTicketRequest>,
) -> HelpdeskResult<Json<TicketResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: TicketId = parse_id(&id, "ticket")?;
    let technician_id = parse_optional_id(req.technician_id.as_deref(), "technician")?;

    let ticket = TicketService::new(state.repo.clone(), state.accounts.clone(), state.notifier())
        .update(
            &caller,
            &id,
            TicketUpdateInput {
                title: req.title,
                description: req.description,
                status: req.status,
                technician_id,
            },
        )
        .await?;

    Ok(Json(TicketResponse::from(&ticket)))
}

/// DELETE /api/tickets/{id}
pub async fn delete_ticket<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> HelpdeskResult<Json<MessageResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: TicketId = parse_id(&id, "ticket")?;
    TicketService::new(state.repo.clone(), state.accounts.clone(), state.notifier())
        .delete(&caller, &id)
        .await?;

    Ok(Json(MessageResponse::new("Ticket deleted")))
}

// ============================================================================
// KPIs
// ============================================================================

/// POST /api/kpis
pub async fn create_kpi<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Json(req): Json<CreateKpiRequest>,
) -> HelpdeskResult<(StatusCode, Json<KpiResponse>)>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let kpi = KpiService::new(state.repo.clone()).create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(KpiResponse::from(&kpi))))
}

/// GET /api/kpis
pub async fn list_kpis<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
) -> HelpdeskResult<Json<Vec<KpiResponse>>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let kpis = KpiService::new(state.repo.clone()).list().await?;
    Ok(Json(kpis.iter().map(KpiResponse::from).collect()))
}

/// GET /api/kpis/{id}
pub async fn get_kpi<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
) -> HelpdeskResult<Json<KpiResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: KpiId = parse_id(&id, "KPI")?;
    let kpi = KpiService::new(state.repo.clone()).get(&id).await?;
    Ok(Json(KpiResponse::from(&kpi)))
}

/// DELETE /api/kpis/{id}
pub async fn delete_kpi<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Path(id): Path<String>,
) -> HelpdeskResult<Json<MessageResponse>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let id: KpiId = parse_id(&id, "KPI")?;
    KpiService::new(state.repo.clone()).delete(&id).await?;
    Ok(Json(MessageResponse::new("KPI deleted")))
}

// ============================================================================
// Request Types and Service Requests
// ============================================================================

/// POST /api/request-types
pub async fn create_request_type<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Json(req): Json<CreateRequestTypeRequest>,
) -> HelpdeskResult<(StatusCode, Json<RequestTypeResponse>)>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let request_type = RequestService::new(state.repo.clone(), state.notifier())
        .create_type(&req.name, req.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(RequestTypeResponse::from(&request_type))))
}

/// GET /api/request-types (public)
pub async fn list_request_types<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
) -> HelpdeskResult<Json<Vec<RequestTypeResponse>>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let request_types = RequestService::new(state.repo.clone(), state.notifier())
        .list_types()
        .await?;

    Ok(Json(request_types.iter().map(RequestTypeResponse::from).collect()))
}

/// POST /api/requests (public)
pub async fn submit_request<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Json(req): Json<SubmitRequestRequest>,
) -> HelpdeskResult<(StatusCode, Json<ServiceRequestResponse>)>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let request_type_id: Option<RequestTypeId> =
        parse_optional_id(req.request_type_id.as_deref(), "request type")?;

    let request = RequestService::new(state.repo.clone(), state.notifier())
        .submit(ServiceRequestInput {
            name: req.name,
            national_id: req.national_id,
            position: req.position,
            request_type_id,
            email: req.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ServiceRequestResponse::from(&request))))
}

/// GET /api/requests?typeId=
pub async fn list_requests<R, A, M>(
    State(state): State<HelpdeskAppState<R, A, M>>,
    Query(query): Query<RequestListQuery>,
) -> HelpdeskResult<Json<Vec<ServiceRequestResponse>>>
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let type_id: Option<RequestTypeId> = parse_optional_id(query.type_id.as_deref(), "request type")?;
    let requests = RequestService::new(state.repo.clone(), state.notifier())
        .list(type_id.as_ref())
        .await?;

    Ok(Json(requests.iter().map(ServiceRequestResponse::from).collect()))
}
