//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credentials;
pub mod login;
pub mod profile;
pub mod session_token;

// Re-exports
pub use config::AuthConfig;
pub use credentials::{CredentialStore, ProfileInput, RegisterInput};
pub use login::{LoginOutput, LoginUseCase};
pub use profile::ProfileUseCase;
pub use session_token::{CallerIdentity, Claims, IssuedToken, TokenIssuer, TokenVerifier};
