//! Value Object Module

pub mod percentage;
pub mod ticket_identifier;
pub mod ticket_status;

pub use percentage::{KpiStatus, Percentage};
pub use ticket_identifier::TicketIdentifier;
pub use ticket_status::TicketStatus;
