//! Random Identifiers

use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Lowercase hex string of exactly `chars` characters.
///
/// Used for short human-readable references such as ticket identifiers.
pub fn random_hex(chars: usize) -> String {
    let mut encoded = hex::encode(random_bytes(chars.div_ceil(2)));
    encoded.truncate(chars);
    encoded
}
