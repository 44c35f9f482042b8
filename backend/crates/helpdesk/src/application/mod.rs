//! Application Layer
//!
//! One service per feature, plus mail notifications.

pub mod config;
pub mod incident_types;
pub mod kpis;
pub mod notifications;
pub mod requests;
pub mod technicians;
pub mod tickets;

// Re-exports
pub use config::HelpdeskConfig;
pub use incident_types::IncidentTypeService;
pub use kpis::{KpiInput, KpiService};
pub use notifications::Notifier;
pub use requests::{RequestService, ServiceRequestInput};
pub use technicians::{TechnicianInput, TechnicianService};
pub use tickets::{TicketInput, TicketService, TicketUpdateInput};
