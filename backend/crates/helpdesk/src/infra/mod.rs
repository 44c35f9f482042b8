//! Infrastructure Layer

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod postgres;
