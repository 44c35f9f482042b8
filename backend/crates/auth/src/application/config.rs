//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Default token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    token_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Build from an explicit secret; an empty secret is refused.
    pub fn new(token_secret: impl Into<Vec<u8>>, token_ttl: Duration) -> AuthResult<Self> {
        let token_secret = token_secret.into();
        if token_secret.is_empty() {
            return Err(AuthError::Internal(
                "token signing secret must be non-empty".to_string(),
            ));
        }
        if token_ttl.is_zero() {
            return Err(AuthError::Internal(
                "token lifetime must be positive".to_string(),
            ));
        }
        Ok(Self {
            token_secret,
            token_ttl,
        })
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn token_secret(&self) -> &[u8] {
        &self.token_secret
    }

    /// Token lifetime in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_secret() {
        assert!(AuthConfig::new(Vec::new(), DEFAULT_TOKEN_TTL).is_err());
        assert!(AuthConfig::new(b"secret".to_vec(), Duration::ZERO).is_err());
    }

    #[test]
    fn test_development_defaults() {
        let config = AuthConfig::development();
        assert_eq!(config.token_secret().len(), 32);
        assert_eq!(config.token_ttl_secs(), 3600);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new(b"super-secret-value".to_vec(), DEFAULT_TOKEN_TTL).unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret-value"));
    }
}
