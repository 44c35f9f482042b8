//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router. Authentication middleware comes from
//! the `auth` crate.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::HelpdeskAppState;
pub use router::{helpdesk_router, helpdesk_router_generic};
