//! Technician Entity
//!
//! Support staff tickets are assigned to. Always backed by an account.

use auth::models::Email;
use chrono::{DateTime, Utc};
use kernel::id::{AccountId, TechnicianId};

#[derive(Debug, Clone, PartialEq)]
pub struct Technician {
    pub technician_id: TechnicianId,
    /// Full display name ("First Last")
    pub name: String,
    /// Unique across technicians
    pub email: Email,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Technician {
    pub fn new(name: String, email: Email, account_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            technician_id: TechnicianId::new(),
            name,
            email,
            account_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the present fields only.
    pub fn apply_changes(&mut self, name: Option<String>, email: Option<Email>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }
}
