//! Value Object Module

pub mod email;
pub mod national_id;
pub mod user_password;

pub use email::Email;
pub use national_id::NationalId;
pub use user_password::{RawPassword, UserPassword};
