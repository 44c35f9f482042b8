//! Incident Type Entity
//!
//! Category a ticket can be filed under (e.g. "Hardware", "Network").

use chrono::{DateTime, Utc};
use kernel::id::IncidentTypeId;

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentType {
    pub incident_type_id: IncidentTypeId,
    /// Unique across incident types
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IncidentType {
    pub fn new(type_name: String) -> Self {
        let now = Utc::now();
        Self {
            incident_type_id: IncidentTypeId::new(),
            type_name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, type_name: String) {
        self.type_name = type_name;
        self.updated_at = Utc::now();
    }
}
