//! HTTP channels — the Twilio webhook and the router that serves it.

pub mod twilio;
pub mod twiml;

pub use twilio::{WEBHOOK_PATH, WebhookState, webhook_routes};
pub use twiml::ReplyEnvelope;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::pipeline::QueryProcessor;

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Build the full application router: webhook, health check, request tracing.
pub fn create_router(processor: Arc<QueryProcessor>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(webhook_routes(processor))
        .layer(TraceLayer::new_for_http())
}
