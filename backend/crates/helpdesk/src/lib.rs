//! Help Desk Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Tickets, technicians, incident types, KPIs, service requests
//! - `application/` - Services per feature, mail notifications
//! - `infra/` - PostgreSQL (and in-memory) store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Authentication comes from the `auth` crate: protected routes sit behind
//! `auth::require_auth` and read the caller from `auth::CallerIdentity`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::HelpdeskConfig;
pub use error::{HelpdeskError, HelpdeskResult};
pub use infra::postgres::PgHelpdeskRepository;
pub use presentation::router::{helpdesk_router, helpdesk_router_generic};

#[cfg(any(test, feature = "memory"))]
pub use infra::memory::InMemoryHelpdeskRepository;
