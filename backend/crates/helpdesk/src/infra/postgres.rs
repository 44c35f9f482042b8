//! PostgreSQL Repository Implementations

use auth::models::{Email, NationalId};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    AccountId, IncidentTypeId, KpiId, RequestTypeId, ServiceRequestId, TechnicianId, TicketId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{IncidentType, Kpi, RequestType, ServiceRequest, Technician, Ticket};
use crate::domain::repository::{
    IncidentTypeRepository, KpiRepository, RequestRepository, TechnicianRepository,
    TicketRepository,
};
use crate::domain::value_object::{
    percentage::{KpiStatus, Percentage},
    ticket_identifier::TicketIdentifier,
    ticket_status::TicketStatus,
};
use crate::error::{HelpdeskError, HelpdeskResult};

/// PostgreSQL-backed help desk store
#[derive(Clone)]
pub struct PgHelpdeskRepository {
    pool: PgPool,
}

impl PgHelpdeskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations become `Duplicate(what)`; everything else is storage.
fn unique_as_duplicate(err: sqlx::Error, what: &'static str) -> HelpdeskError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => HelpdeskError::Duplicate(what),
        other => HelpdeskError::Storage(other),
    }
}

// ============================================================================
// Incident Types
// ============================================================================

impl IncidentTypeRepository for PgHelpdeskRepository {
    async fn create_incident_type(&self, incident_type: &IncidentType) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO incident_types (incident_type_id, type_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(incident_type.incident_type_id.as_uuid())
        .bind(&incident_type.type_name)
        .bind(incident_type.created_at)
        .bind(incident_type.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_as_duplicate(e, "Incident type"))?;

        Ok(())
    }

    async fn list_incident_types(&self) -> HelpdeskResult<Vec<IncidentType>> {
        let rows = sqlx::query_as::<_, IncidentTypeRow>(
            r#"
            SELECT incident_type_id, type_name, created_at, updated_at
            FROM incident_types
            ORDER BY type_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(IncidentTypeRow::into_incident_type).collect())
    }

    async fn find_incident_type(&self, id: &IncidentTypeId) -> HelpdeskResult<Option<IncidentType>> {
        let row = sqlx::query_as::<_, IncidentTypeRow>(
            r#"
            SELECT incident_type_id, type_name, created_at, updated_at
            FROM incident_types
            WHERE incident_type_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IncidentTypeRow::into_incident_type))
    }

    async fn update_incident_type(&self, incident_type: &IncidentType) -> HelpdeskResult<()> {
        sqlx::query(
            "UPDATE incident_types SET type_name = $2, updated_at = $3 WHERE incident_type_id = $1",
        )
        .bind(incident_type.incident_type_id.as_uuid())
        .bind(&incident_type.type_name)
        .bind(incident_type.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_as_duplicate(e, "Incident type"))?;

        Ok(())
    }

    async fn delete_incident_type(&self, id: &IncidentTypeId) -> HelpdeskResult<bool> {
        let deleted = sqlx::query("DELETE FROM incident_types WHERE incident_type_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Technicians
// ============================================================================

impl TechnicianRepository for PgHelpdeskRepository {
    async fn create_technician(&self, technician: &Technician) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO technicians (
                technician_id,
                name,
                email,
                account_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(technician.technician_id.as_uuid())
        .bind(&technician.name)
        .bind(technician.email.as_str())
        .bind(technician.account_id.as_uuid())
        .bind(technician.created_at)
        .bind(technician.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_as_duplicate(e, "Technician"))?;

        Ok(())
    }

    async fn list_technicians(&self) -> HelpdeskResult<Vec<Technician>> {
        let rows = sqlx::query_as::<_, TechnicianRow>(
            r#"
            SELECT technician_id, name, email, account_id, created_at, updated_at
            FROM technicians
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TechnicianRow::into_technician).collect())
    }

    async fn find_technician(&self, id: &TechnicianId) -> HelpdeskResult<Option<Technician>> {
        let row = sqlx::query_as::<_, TechnicianRow>(
            r#"
            SELECT technician_id, name, email, account_id, created_at, updated_at
            FROM technicians
            WHERE technician_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TechnicianRow::into_technician))
    }

    async fn technician_email_exists(&self, email: &Email) -> HelpdeskResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM technicians WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_technician(&self, technician: &Technician) -> HelpdeskResult<()> {
        sqlx::query(
            "UPDATE technicians SET name = $2, email = $3, updated_at = $4 WHERE technician_id = $1",
        )
        .bind(technician.technician_id.as_uuid())
        .bind(&technician.name)
        .bind(technician.email.as_str())
        .bind(technician.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_as_duplicate(e, "Technician"))?;

        Ok(())
    }

    async fn delete_technician(&self, id: &TechnicianId) -> HelpdeskResult<bool> {
        let deleted = sqlx::query("DELETE FROM technicians WHERE technician_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Tickets
// ============================================================================

const TICKET_COLUMNS: &str = r#"
    ticket_id,
    identifier,
    title,
    description,
    status,
    owner_id,
    technician_id,
    incident_type_id,
    created_at,
    updated_at
"#;

impl TicketRepository for PgHelpdeskRepository {
    async fn create_ticket(&self, ticket: &Ticket) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tickets (
                ticket_id,
                identifier,
                title,
                description,
                status,
                owner_id,
                technician_id,
                incident_type_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(ticket.ticket_id.as_uuid())
        .bind(ticket.identifier.as_str())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.owner_id.as_uuid())
        .bind(ticket.technician_id.map(TechnicianId::into_uuid))
        .bind(ticket.incident_type_id.map(IncidentTypeId::into_uuid))
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_as_duplicate(e, "Ticket identifier"))?;

        Ok(())
    }

    async fn list_tickets_for_owner(&self, owner_id: &AccountId) -> HelpdeskResult<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TicketRow::into_ticket).collect()
    }

    async fn find_ticket(&self, id: &TicketId) -> HelpdeskResult<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TicketRow::into_ticket).transpose()
    }

    async fn update_ticket(&self, ticket: &Ticket) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            UPDATE tickets SET
                title = $2,
                description = $3,
                status = $4,
                technician_id = $5,
                updated_at = $6
            WHERE ticket_id = $1
            "#,
        )
        .bind(ticket.ticket_id.as_uuid())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.technician_id.map(TechnicianId::into_uuid))
        .bind(ticket.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_ticket(&self, id: &TicketId) -> HelpdeskResult<bool> {
        let deleted = sqlx::query("DELETE FROM tickets WHERE ticket_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// KPIs
// ============================================================================

const KPI_COLUMNS: &str = r#"
    kpi_id,
    name,
    methodology,
    indicator_percentage,
    frequency,
    measurement_date,
    achieved_percentage,
    status,
    created_at,
    updated_at
"#;

impl KpiRepository for PgHelpdeskRepository {
    async fn create_kpi(&self, kpi: &Kpi) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kpis (
                kpi_id,
                name,
                methodology,
                indicator_percentage,
                frequency,
                measurement_date,
                achieved_percentage,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(kpi.kpi_id.as_uuid())
        .bind(&kpi.name)
        .bind(&kpi.methodology)
        .bind(kpi.indicator_percentage.value())
        .bind(&kpi.frequency)
        .bind(kpi.measurement_date)
        .bind(kpi.achieved_percentage.value())
        .bind(kpi.status.as_str())
        .bind(kpi.created_at)
        .bind(kpi.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_kpis(&self) -> HelpdeskResult<Vec<Kpi>> {
        let rows = sqlx::query_as::<_, KpiRow>(&format!(
            "SELECT {KPI_COLUMNS} FROM kpis ORDER BY measurement_date DESC, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(KpiRow::into_kpi).collect())
    }

    async fn find_kpi(&self, id: &KpiId) -> HelpdeskResult<Option<Kpi>> {
        let row = sqlx::query_as::<_, KpiRow>(&format!(
            "SELECT {KPI_COLUMNS} FROM kpis WHERE kpi_id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(KpiRow::into_kpi))
    }

    async fn delete_kpi(&self, id: &KpiId) -> HelpdeskResult<bool> {
        let deleted = sqlx::query("DELETE FROM kpis WHERE kpi_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Request Types and Service Requests
// ============================================================================

impl RequestRepository for PgHelpdeskRepository {
    async fn create_request_type(&self, request_type: &RequestType) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO request_types (request_type_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request_type.request_type_id.as_uuid())
        .bind(&request_type.name)
        .bind(request_type.description.as_deref())
        .bind(request_type.created_at)
        .bind(request_type.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_request_types(&self) -> HelpdeskResult<Vec<RequestType>> {
        let rows = sqlx::query_as::<_, RequestTypeRow>(
            r#"
            SELECT request_type_id, name, description, created_at, updated_at
            FROM request_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RequestTypeRow::into_request_type).collect())
    }

    async fn find_request_type(&self, id: &RequestTypeId) -> HelpdeskResult<Option<RequestType>> {
        let row = sqlx::query_as::<_, RequestTypeRow>(
            r#"
            SELECT request_type_id, name, description, created_at, updated_at
            FROM request_types
            WHERE request_type_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RequestTypeRow::into_request_type))
    }

    async fn create_request(&self, request: &ServiceRequest) -> HelpdeskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO service_requests (
                service_request_id,
                requester_name,
                national_id,
                position,
                request_type_id,
                requester_email,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(request.service_request_id.as_uuid())
        .bind(&request.requester_name)
        .bind(request.national_id.as_str())
        .bind(&request.position)
        .bind(request.request_type_id.as_uuid())
        .bind(request.requester_email.as_ref().map(Email::as_str))
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_requests(
        &self,
        request_type_id: Option<&RequestTypeId>,
    ) -> HelpdeskResult<Vec<ServiceRequest>> {
        // NULL filter means all types
        let rows = sqlx::query_as::<_, ServiceRequestRow>(
            r#"
            SELECT
                service_request_id,
                requester_name,
                national_id,
                position,
                request_type_id,
                requester_email,
                created_at
            FROM service_requests
            WHERE $1::uuid IS NULL OR request_type_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(request_type_id.map(|id| id.into_uuid()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ServiceRequestRow::into_request).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IncidentTypeRow {
    incident_type_id: Uuid,
    type_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IncidentTypeRow {
    fn into_incident_type(self) -> IncidentType {
        IncidentType {
            incident_type_id: IncidentTypeId::from_uuid(self.incident_type_id),
            type_name: self.type_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TechnicianRow {
    technician_id: Uuid,
    name: String,
    email: String,
    account_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TechnicianRow {
    fn into_technician(self) -> Technician {
        Technician {
            technician_id: TechnicianId::from_uuid(self.technician_id),
            name: self.name,
            email: Email::from_db(self.email),
            account_id: AccountId::from_uuid(self.account_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    ticket_id: Uuid,
    identifier: String,
    title: String,
    description: String,
    status: String,
    owner_id: Uuid,
    technician_id: Option<Uuid>,
    incident_type_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TicketRow {
    fn into_ticket(self) -> HelpdeskResult<Ticket> {
        let status = self
            .status
            .parse::<TicketStatus>()
            .map_err(|_| HelpdeskError::Internal(format!("Invalid ticket status: {}", self.status)))?;

        Ok(Ticket {
            ticket_id: TicketId::from_uuid(self.ticket_id),
            identifier: TicketIdentifier::from_db(self.identifier),
            title: self.title,
            description: self.description,
            status,
            owner_id: AccountId::from_uuid(self.owner_id),
            technician_id: self.technician_id.map(TechnicianId::from_uuid),
            incident_type_id: self.incident_type_id.map(IncidentTypeId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct KpiRow {
    kpi_id: Uuid,
    name: String,
    methodology: String,
    indicator_percentage: f64,
    frequency: String,
    measurement_date: NaiveDate,
    achieved_percentage: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl KpiRow {
    fn into_kpi(self) -> Kpi {
        Kpi {
            kpi_id: KpiId::from_uuid(self.kpi_id),
            name: self.name,
            methodology: self.methodology,
            indicator_percentage: Percentage::from_db(self.indicator_percentage),
            frequency: self.frequency,
            measurement_date: self.measurement_date,
            achieved_percentage: Percentage::from_db(self.achieved_percentage),
            status: KpiStatus::from_db(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RequestTypeRow {
    request_type_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RequestTypeRow {
    fn into_request_type(self) -> RequestType {
        RequestType {
            request_type_id: RequestTypeId::from_uuid(self.request_type_id),
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ServiceRequestRow {
    service_request_id: Uuid,
    requester_name: String,
    national_id: String,
    position: String,
    request_type_id: Uuid,
    requester_email: Option<String>,
    created_at: DateTime<Utc>,
}

impl ServiceRequestRow {
    fn into_request(self) -> ServiceRequest {
        ServiceRequest {
            service_request_id: ServiceRequestId::from_uuid(self.service_request_id),
            requester_name: self.requester_name,
            national_id: NationalId::from_db(self.national_id),
            position: self.position,
            request_type_id: RequestTypeId::from_uuid(self.request_type_id),
            requester_email: self.requester_email.map(Email::from_db),
            created_at: self.created_at,
        }
    }
}
