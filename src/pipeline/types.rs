//! Shared types for the query pipeline.

use serde::{Deserialize, Serialize};

use crate::error::WebhookError;

// ── Inbound message ─────────────────────────────────────────────────

/// An inbound SMS/WhatsApp message as posted by the messaging provider.
///
/// Field names follow the provider's form encoding (`From`, `Body`). Missing
/// fields deserialize to empty strings so validation can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender identifier, optionally prefixed with `whatsapp:`.
    #[serde(rename = "From", default)]
    pub from_number: String,
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: String,
}

impl InboundMessage {
    pub fn new(from_number: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from_number: from_number.into(),
            body: body.into(),
        }
    }

    /// Both fields must be present and non-empty.
    pub fn validate(&self) -> Result<(), WebhookError> {
        if self.from_number.is_empty() || self.body.is_empty() {
            return Err(WebhookError::MissingFields);
        }
        Ok(())
    }

    /// Short body preview for logs.
    pub fn preview(&self) -> String {
        self.body.chars().take(100).collect()
    }
}

// ── Category ────────────────────────────────────────────────────────

/// Intent of an inbound query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Employee-specific details tied to the sender's phone number.
    CheckingDetails,
    /// General information about the organisation.
    GeneralInformation,
    /// The classifier gave no usable answer.
    Unclassified,
}

impl Category {
    /// Map raw classifier output to a category.
    ///
    /// Only the bare tokens `1` and `2` (surrounding whitespace ignored) are
    /// recognised; everything else is `Unclassified`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "1" => Self::CheckingDetails,
            "2" => Self::GeneralInformation,
            _ => Self::Unclassified,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CheckingDetails => "checking_details",
            Self::GeneralInformation => "general_information",
            Self::Unclassified => "unclassified",
        }
    }
}

// ── Reply plan ──────────────────────────────────────────────────────

/// What the processor will do to produce the reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPlan {
    /// Call the response generator with this context.
    Generate { context: String },
    /// Reply with fixed text; no generator call.
    Fixed(&'static str),
}

// ── Processed reply ─────────────────────────────────────────────────

/// Result of running one message through the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedReply {
    pub category: Category,
    /// Context handed to the generator, if it was called.
    pub context: Option<String>,
    /// Text to put in the reply envelope.
    pub text: String,
}
