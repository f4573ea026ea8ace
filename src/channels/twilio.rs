//! Twilio webhook channel — `POST /twilio_webhook` for SMS and WhatsApp.
//!
//! The provider posts the message as a form (`From`, `Body`, plus fields we
//! ignore) and reads the TwiML body of our response as the reply.

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tracing::warn;

use crate::channels::twiml::ReplyEnvelope;
use crate::error::WebhookError;
use crate::pipeline::{InboundMessage, QueryProcessor};

/// Path the messaging provider is configured to call.
pub const WEBHOOK_PATH: &str = "/twilio_webhook";

/// Shared state for the webhook route.
#[derive(Clone)]
pub struct WebhookState {
    pub processor: Arc<QueryProcessor>,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match self {
            WebhookError::MissingFields => StatusCode::BAD_REQUEST,
        };
        ReplyEnvelope::new(format!("Error: {self}")).with_status(status)
    }
}

/// POST /twilio_webhook
///
/// Always answers with a TwiML envelope: 400 when `From` or `Body` is
/// missing, 200 for everything else (including downstream failures).
async fn twilio_webhook(
    State(state): State<WebhookState>,
    form: Result<Form<InboundMessage>, FormRejection>,
) -> Response {
    let message = match form {
        Ok(Form(message)) => message,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable webhook form");
            return WebhookError::MissingFields.into_response();
        }
    };

    match state.processor.process(&message).await {
        Ok(reply) => ReplyEnvelope::new(reply.text).into_response(),
        Err(e) => {
            warn!(
                error = %e,
                has_from = !message.from_number.is_empty(),
                has_body = !message.body.is_empty(),
                "Rejected webhook request"
            );
            e.into_response()
        }
    }
}

/// Build the webhook routes.
pub fn webhook_routes(processor: Arc<QueryProcessor>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(twilio_webhook))
        .with_state(WebhookState { processor })
}
