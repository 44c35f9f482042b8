//! Process configuration
//!
//! Read once at startup from the environment (and `.env`, if present).

use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use helpdesk::HelpdeskConfig;
use platform::config::{env_list, env_or, optional_env, required_env};
use platform::mail::SmtpSettings;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
    /// `None` when `SMTP_HOST` is unset; mail is then only logged
    pub smtp: Option<SmtpSettings>,
    pub helpdesk: HelpdeskConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required_env("DATABASE_URL")?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            port: env_or("PORT", DEFAULT_PORT)?,
            cors_origins: env_list("CORS_ORIGINS"),
            auth: auth_config()?,
            smtp: smtp_settings()?,
            helpdesk: HelpdeskConfig::new(optional_env("HELPDESK_ADMIN_EMAIL")),
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let ttl = Duration::from_secs(env_or("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?);

    match optional_env("JWT_SECRET") {
        Some(secret) => Ok(AuthConfig::new(secret.into_bytes(), ttl)?),
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random development secret");
            Ok(AuthConfig::new(platform::crypto::random_bytes(32), ttl)?)
        }
        None => Err(anyhow::anyhow!("JWT_SECRET must be set in production")),
    }
}

fn smtp_settings() -> anyhow::Result<Option<SmtpSettings>> {
    let Some(host) = optional_env("SMTP_HOST") else {
        return Ok(None);
    };

    let username = optional_env("SMTP_USERNAME");
    let from = optional_env("MAIL_FROM")
        .or_else(|| username.clone())
        .context("MAIL_FROM (or SMTP_USERNAME) must be set when SMTP_HOST is")?;

    Ok(Some(SmtpSettings {
        host,
        port: env_or("SMTP_PORT", DEFAULT_SMTP_PORT)?,
        username,
        password: optional_env("SMTP_PASSWORD"),
        from,
    }))
}
