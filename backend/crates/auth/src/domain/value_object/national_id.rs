//! National identity number (cédula)

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

const NATIONAL_ID_MAX_LENGTH: usize = 20;

/// Digits, ASCII letters and hyphens; spaces are stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    pub fn new(raw: &str) -> AppResult<Self> {
        let value: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        if value.is_empty() {
            return Err(AppError::bad_request("National ID is required"));
        }
        if value.chars().count() > NATIONAL_ID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "National ID must be at most {} characters",
                NATIONAL_ID_MAX_LENGTH
            )));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AppError::bad_request(
                "National ID may only contain letters, digits and hyphens",
            ));
        }

        Ok(Self(value))
    }

    /// Absent or blank input means "not provided".
    pub fn optional(raw: Option<&str>) -> AppResult<Option<Self>> {
        match raw {
            Some(value) if !value.trim().is_empty() => Self::new(value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_id() {
        assert_eq!(NationalId::new(" 0102 345678 ").unwrap().as_str(), "0102345678");
        assert!(NationalId::new("1-2345-678").is_ok());
        assert!(NationalId::new("").is_err());
        assert!(NationalId::new("12#45").is_err());
        assert!(NationalId::new(&"9".repeat(21)).is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(NationalId::optional(None).unwrap(), None);
        assert_eq!(NationalId::optional(Some("  ")).unwrap(), None);
        assert!(NationalId::optional(Some("0102345678")).unwrap().is_some());
    }
}
