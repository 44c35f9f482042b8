//! Request types and the service requests filed against them
//!
//! Service requests come from a public form (no account needed), so the
//! requester is described by name, national id and position.

use auth::models::{Email, NationalId};
use chrono::{DateTime, Utc};
use kernel::id::{RequestTypeId, ServiceRequestId};

#[derive(Debug, Clone, PartialEq)]
pub struct RequestType {
    pub request_type_id: RequestTypeId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestType {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            request_type_id: RequestTypeId::new(),
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub service_request_id: ServiceRequestId,
    pub requester_name: String,
    pub national_id: NationalId,
    pub position: String,
    pub request_type_id: RequestTypeId,
    /// Where the confirmation was sent, if anywhere
    pub requester_email: Option<Email>,
    pub created_at: DateTime<Utc>,
}

impl ServiceRequest {
    pub fn new(
        requester_name: String,
        national_id: NationalId,
        position: String,
        request_type_id: RequestTypeId,
        requester_email: Option<Email>,
    ) -> Self {
        Self {
            service_request_id: ServiceRequestId::new(),
            requester_name,
            national_id,
            position,
            request_type_id,
            requester_email,
            created_at: Utc::now(),
        }
    }
}
