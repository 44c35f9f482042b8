//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no help-desk vocabulary:
//! - Password hashing (Argon2id) with redacted, zeroized clear text
//! - Random identifiers
//! - Outbound mail (SMTP via lettre, or log-only)
//! - Environment configuration helpers

pub mod config;
pub mod crypto;
pub mod mail;
pub mod password;
