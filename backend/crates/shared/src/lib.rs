//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary every help-desk crate agrees on:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed entity identifiers ([`id::Id`])
//! - Cross-cutting input validation ([`text`])
//!
//! Only things with the same meaning in every bounded context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod text;
