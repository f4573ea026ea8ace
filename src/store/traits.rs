//! `RecordStore` trait — the read-only lookup the webhook path depends on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;

/// Transport prefixes the messaging provider puts in front of a sender.
const TRANSPORT_PREFIXES: &[&str] = &["whatsapp:"];

/// A provisioned phone number and its free-text details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub phone_number: String,
    pub details: String,
}

impl PhoneRecord {
    pub fn new(phone_number: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            details: details.into(),
        }
    }
}

/// Strip a known transport prefix (e.g. `whatsapp:`) from a sender id.
///
/// Surrounding whitespace is trimmed; anything else is returned as-is, so
/// lookups stay exact-match.
pub fn normalize_phone_number(raw: &str) -> &str {
    let trimmed = raw.trim();
    TRANSPORT_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Per-phone-number details lookup.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the details stored for a phone number.
    ///
    /// The number is normalized with [`normalize_phone_number`] first.
    /// Returns `Ok(None)` when no row matches.
    async fn lookup(&self, phone_number: &str) -> Result<Option<String>, DatabaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whatsapp_prefix() {
        assert_eq!(normalize_phone_number("whatsapp:+15551234567"), "+15551234567");
    }

    #[test]
    fn plain_number_is_unchanged() {
        assert_eq!(normalize_phone_number("+15551234567"), "+15551234567");
        assert_eq!(normalize_phone_number("  +15551234567 "), "+15551234567");
    }

    #[test]
    fn unknown_prefix_is_kept() {
        assert_eq!(normalize_phone_number("sms:+15551234567"), "sms:+15551234567");
    }
}
