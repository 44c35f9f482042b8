//! Text field validation
//!
//! Request bodies arrive with `#[serde(default)]` strings, so a missing field
//! and an empty one look the same. These helpers turn them into 400s with the
//! field name in the message.

use crate::error::app_error::{AppError, AppResult};

/// Trimmed, non-empty, at most `max_chars` characters.
pub fn required(field: &'static str, value: &str, max_chars: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    check_length(field, trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// `None` for absent or blank input, otherwise the trimmed value.
pub fn optional(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> AppResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed, max_chars)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> AppResult<()> {
    if value.chars().count() > max_chars {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}
