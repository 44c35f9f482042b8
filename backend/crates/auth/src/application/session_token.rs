//! Session Tokens
//!
//! Stateless HS256 tokens carrying `{id, email, iat, exp}`. Nothing is
//! stored server-side, so a token stays valid until `exp`.
//!
//! Expiry is checked here against an explicit clock rather than by
//! `jsonwebtoken`, which keeps the `[iat, exp)` window exact (zero leeway)
//! and testable.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::AccountId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::error::{AuthError, AuthResult};

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "id")]
    pub user_id: Uuid,
    pub email: String,
    /// Issued at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Identity of the authenticated caller, produced by the bearer guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: AccountId,
    pub email: String,
}

impl From<Claims> for CallerIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: AccountId::from_uuid(claims.user_id),
            email: claims.email,
        }
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Issuer
// ============================================================================

#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn issue(&self, account: &Account) -> AuthResult<IssuedToken> {
        self.issue_at(account, Utc::now())
    }

    pub fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let iat = now.timestamp();
        let exp = iat.saturating_add(self.config.token_ttl_secs());

        let claims = Claims {
            user_id: account.account_id.into_uuid(),
            email: account.email.to_string(),
            iat,
            exp,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.token_secret()),
        )
        .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))?;

        let expires_at = Utc
            .timestamp_opt(exp, 0)
            .single()
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

// ============================================================================
// Verifier
// ============================================================================

#[derive(Clone)]
pub struct TokenVerifier {
    config: Arc<AuthConfig>,
}

impl TokenVerifier {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn verify(&self, token: &str) -> AuthResult<CallerIdentity> {
        self.verify_at(token, Utc::now())
    }

    /// Valid iff the signature matches and `now < exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<CallerIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.token_secret()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token decode failed");
            AuthError::InvalidOrExpiredToken
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        Ok(data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::time::Duration as StdDuration;

    use crate::domain::entity::account::AccountProfile;
    use crate::domain::value_object::{
        email::Email,
        user_password::{RawPassword, UserPassword},
    };

    fn config(secret: &[u8]) -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new(secret.to_vec(), StdDuration::from_secs(3600)).unwrap())
    }

    fn account() -> Account {
        let raw = RawPassword::new("pw123".to_string()).unwrap();
        Account::new(
            Email::new("a@x.com").unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
            AccountProfile::default(),
        )
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_token_valid_within_window() {
        let config = config(b"test-secret");
        let issuer = TokenIssuer::new(config.clone());
        let verifier = TokenVerifier::new(config);
        let account = account();

        let t = at(1_700_000_000);
        let issued = issuer.issue_at(&account, t).unwrap();
        assert_eq!(issued.expires_at, t + Duration::hours(1));

        for offset in [0, 1, 1800, 3599] {
            let identity = verifier
                .verify_at(&issued.token, t + Duration::seconds(offset))
                .unwrap();
            assert_eq!(identity.user_id, account.account_id);
            assert_eq!(identity.email, "a@x.com");
        }
    }

    #[test]
    fn test_token_rejected_at_and_after_expiry() {
        let config = config(b"test-secret");
        let issuer = TokenIssuer::new(config.clone());
        let verifier = TokenVerifier::new(config);

        let t = at(1_700_000_000);
        let issued = issuer.issue_at(&account(), t).unwrap();

        for offset in [3600, 3601, 86_400] {
            assert!(matches!(
                verifier.verify_at(&issued.token, t + Duration::seconds(offset)),
                Err(AuthError::InvalidOrExpiredToken)
            ));
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = TokenIssuer::new(config(b"secret-one"))
            .issue(&account())
            .unwrap();
        let result = TokenVerifier::new(config(b"secret-two")).verify(&issued.token);
        assert!(matches!(result, Err(AuthError::InvalidOrExpiredToken)));
    }

    #[test]
    fn test_garbage_rejected() {
        let verifier = TokenVerifier::new(config(b"test-secret"));
        for token in ["", "abc", "a.b.c", "Bearer"] {
            assert!(matches!(
                verifier.verify(token),
                Err(AuthError::InvalidOrExpiredToken)
            ));
        }
    }

    #[test]
    fn test_claims_wire_names() {
        let config = config(b"test-secret");
        let account = account();
        let issued = TokenIssuer::new(config.clone())
            .issue_at(&account, at(1_700_000_000))
            .unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = decode::<serde_json::Value>(
            &issued.token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims["id"], account.account_id.to_string());
        assert_eq!(data.claims["email"], "a@x.com");
        assert_eq!(data.claims["iat"], 1_700_000_000);
        assert_eq!(data.claims["exp"], 1_700_003_600);
    }
}
