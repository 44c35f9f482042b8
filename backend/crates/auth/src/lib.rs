//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository trait
//! - `application/` - Credential store, token issuer/verifier, use cases
//! - `infra/` - PostgreSQL (and in-memory) repositories
//! - `presentation/` - HTTP handlers, DTOs, router, bearer-token middleware
//!
//! ## Features
//! - Account registration and login with email + password
//! - Stateless HS256 session tokens (`{id, email, iat, exp}`)
//! - Bearer-token guard producing a typed [`CallerIdentity`]
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, clear text zeroized
//! - Login failures are indistinguishable (same message, same hashing cost)
//! - No server-side sessions: a token is valid until it expires

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_token::{CallerIdentity, TokenIssuer, TokenVerifier};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::middleware::{AuthLayerState, require_auth};
pub use presentation::router::{auth_router, auth_router_generic};

#[cfg(any(test, feature = "memory"))]
pub use infra::memory::InMemoryAccountRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
