//! Entity Module

pub mod incident_type;
pub mod kpi;
pub mod service_request;
pub mod technician;
pub mod ticket;

pub use incident_type::IncidentType;
pub use kpi::Kpi;
pub use service_request::{RequestType, ServiceRequest};
pub use technician::Technician;
pub use ticket::Ticket;
