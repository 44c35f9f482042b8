//! Environment configuration helpers
//!
//! Every binary setting comes from the process environment (optionally
//! seeded from `.env` by the binary). These helpers keep parsing and error
//! messages uniform across crates.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Read a required, non-empty variable.
pub fn required_env(name: &'static str) -> Result<String, ConfigError> {
    optional_env(name).ok_or(ConfigError::Missing(name))
}

/// Read a variable, treating unset and blank the same.
pub fn optional_env(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a variable, falling back to `default` when it is unset.
pub fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_env(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

/// Comma separated list, blank entries dropped.
pub fn env_list(name: &'static str) -> Vec<String> {
    optional_env(name)
        .map(|raw| split_list(&raw))
        .unwrap_or_default()
}

fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The environment is process-global, so tests only touch names that
    // nothing else reads.

    #[test]
    fn test_missing_required() {
        assert_eq!(
            required_env("PLATFORM_TEST_SURELY_UNSET"),
            Err(ConfigError::Missing("PLATFORM_TEST_SURELY_UNSET"))
        );
    }

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("PLATFORM_TEST_UNSET_PORT", 3000u16), Ok(3000));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u64>("TTL", "3600"), Ok(3600));
        assert_eq!(
            parse_value::<u16>("PORT", "http"),
            Err(ConfigError::Invalid {
                name: "PORT",
                value: "http".to_string()
            })
        );
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("http://localhost:5173, ,https://desk.example.com"),
            vec!["http://localhost:5173", "https://desk.example.com"]
        );
        assert!(split_list("").is_empty());
    }
}
