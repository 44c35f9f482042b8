//! Ticket Entity

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, IncidentTypeId, TechnicianId, TicketId};

use crate::domain::value_object::{ticket_identifier::TicketIdentifier, ticket_status::TicketStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub identifier: TicketIdentifier,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    /// Account that raised the ticket; only it can see or change the ticket
    pub owner_id: AccountId,
    pub technician_id: Option<TechnicianId>,
    pub incident_type_id: Option<IncidentTypeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes for an existing ticket; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub technician_id: Option<TechnicianId>,
}

impl Ticket {
    pub fn open(
        owner_id: AccountId,
        title: String,
        description: String,
        incident_type_id: Option<IncidentTypeId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            ticket_id: TicketId::new(),
            identifier: TicketIdentifier::generate(),
            title,
            description,
            status: TicketStatus::Open,
            owner_id,
            technician_id: None,
            incident_type_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, account_id: &AccountId) -> bool {
        &self.owner_id == account_id
    }

    pub fn apply_changes(&mut self, changes: TicketChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(technician_id) = changes.technician_id {
            self.technician_id = Some(technician_id);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_ticket_defaults() {
        let owner = AccountId::new();
        let ticket = Ticket::open(owner, "Printer".into(), "Jammed".into(), None);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.is_owned_by(&owner));
        assert!(!ticket.is_owned_by(&AccountId::new()));
        assert!(ticket.technician_id.is_none());
    }

    #[test]
    fn test_apply_changes_keeps_absent_fields() {
        let mut ticket = Ticket::open(AccountId::new(), "Printer".into(), "Jammed".into(), None);
        let technician = TechnicianId::new();
        ticket.apply_changes(TicketChanges {
            status: Some(TicketStatus::InProgress),
            technician_id: Some(technician),
            ..Default::default()
        });

        assert_eq!(ticket.title, "Printer");
        assert_eq!(ticket.description, "Jammed");
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.technician_id, Some(technician));
    }
}
