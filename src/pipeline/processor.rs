//! Query processor — classifies inbound messages and builds the reply text.
//!
//! Flow:
//! 1. Validate `From` / `Body` → the only failure surfaced to the caller
//! 2. LLM classification → `Category`
//! 3. Context construction (record lookup or organisation summary)
//! 4. LLM generation, or a fixed reply when there is nothing to generate from
//!
//! Downstream failures never escape: a failed classification is treated as
//! unclassified, a failed lookup as a missing record, and a failed
//! generation as the fixed fallback reply.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::WebhookError;
use crate::pipeline::classifier::IntentClassifier;
use crate::pipeline::prompts::{
    DEFAULT_ORG_SUMMARY, GENERATION_FALLBACK_REPLY, NO_DETAILS_REPLY, UNCLASSIFIED_REPLY,
};
use crate::pipeline::responder::ResponseGenerator;
use crate::pipeline::types::{Category, InboundMessage, ProcessedReply, ReplyPlan};
use crate::store::RecordStore;

/// Turns an inbound message into reply text.
pub struct QueryProcessor {
    classifier: IntentClassifier,
    responder: ResponseGenerator,
    store: Arc<dyn RecordStore>,
    org_summary: String,
}

impl QueryProcessor {
    pub fn new(
        classifier: IntentClassifier,
        responder: ResponseGenerator,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            classifier,
            responder,
            store,
            org_summary: DEFAULT_ORG_SUMMARY.to_string(),
        }
    }

    /// Replace the organisation summary used for general-information queries.
    pub fn with_org_summary(mut self, summary: impl Into<String>) -> Self {
        self.org_summary = summary.into();
        self
    }

    /// Process a single inbound message.
    pub async fn process(&self, message: &InboundMessage) -> Result<ProcessedReply, WebhookError> {
        message.validate()?;

        info!(
            from = %message.from_number,
            "Processing inbound query"
        );
        debug!(body = %message.preview(), "Query body");

        let category = self.classify(&message.body).await;
        let plan = self.context_for(category, &message.from_number).await;

        let processed = match plan {
            ReplyPlan::Fixed(text) => ProcessedReply {
                category,
                context: None,
                text: text.to_string(),
            },
            ReplyPlan::Generate { context } => {
                let text = self.generate(&message.body, &context).await;
                ProcessedReply {
                    category,
                    context: Some(context),
                    text,
                }
            }
        };

        info!(
            from = %message.from_number,
            category = category.label(),
            generated = processed.context.is_some(),
            "Reply ready"
        );
        Ok(processed)
    }

    /// Classify, treating provider failures as unclassified.
    async fn classify(&self, body: &str) -> Category {
        match self.classifier.classify(body).await {
            Ok(category) => category,
            Err(e) => {
                warn!(error = %e, "Classification failed, treating query as unclassified");
                Category::Unclassified
            }
        }
    }

    /// Decide how to reply for a category.
    ///
    /// Deterministic for an unchanged store: the same inputs always yield the
    /// same plan (and therefore the same generator context).
    pub async fn context_for(&self, category: Category, from_number: &str) -> ReplyPlan {
        match category {
            Category::CheckingDetails => match self.lookup(from_number).await {
                Some(details) => ReplyPlan::Generate { context: details },
                None => ReplyPlan::Fixed(NO_DETAILS_REPLY),
            },
            Category::GeneralInformation => ReplyPlan::Generate {
                context: self.org_summary.clone(),
            },
            Category::Unclassified => ReplyPlan::Fixed(UNCLASSIFIED_REPLY),
        }
    }

    /// Look up stored details; storage faults and empty rows read as missing.
    async fn lookup(&self, from_number: &str) -> Option<String> {
        match self.store.lookup(from_number).await {
            Ok(Some(details)) if !details.is_empty() => Some(details),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    error = %e,
                    from = %from_number,
                    "Record lookup failed, treating as not found"
                );
                None
            }
        }
    }

    /// Generate a reply, falling back to fixed text on failure.
    async fn generate(&self, body: &str, context: &str) -> String {
        match self.responder.generate(body, context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Reply generation failed, sending fallback");
                GENERATION_FALLBACK_REPLY.to_string()
            }
        }
    }
}
