//! Help desk configuration

/// Help desk application configuration
#[derive(Debug, Clone, Default)]
pub struct HelpdeskConfig {
    /// Recipient of "new request submitted" notices; none means skip them
    pub admin_email: Option<String>,
}

impl HelpdeskConfig {
    pub fn new(admin_email: Option<String>) -> Self {
        Self {
            admin_email: admin_email.filter(|email| !email.trim().is_empty()),
        }
    }
}
