//! Short public ticket reference quoted in notification emails

use serde::Serialize;

/// Hex characters in an identifier (6 random bytes)
pub const TICKET_IDENTIFIER_LENGTH: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketIdentifier(String);

impl TicketIdentifier {
    pub fn generate() -> Self {
        Self(platform::crypto::random_hex(TICKET_IDENTIFIER_LENGTH))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
