//! TwiML reply envelope.
//!
//! The messaging provider expects the webhook response body to be
//! `<Response><Message>…</Message></Response>` served as `application/xml`.
//! Only `<`, `>` and `&` are escaped in the message text.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Content type of every webhook response.
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// A single-message reply envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyEnvelope {
    message: String,
}

impl ReplyEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Serialize to TwiML. Message text is XML-escaped.
    pub fn to_xml(&self) -> String {
        format!(
            "<Response><Message>{}</Message></Response>",
            quick_xml::escape::partial_escape(self.message.as_str())
        )
    }

    /// Build an HTTP response with the given status.
    pub fn with_status(&self, status: StatusCode) -> Response {
        (
            status,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            self.to_xml(),
        )
            .into_response()
    }
}

impl IntoResponse for ReplyEnvelope {
    fn into_response(self) -> Response {
        self.with_status(StatusCode::OK)
    }
}
