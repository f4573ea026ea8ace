//! Intent classifier — one LLM call mapping a query to a `Category`.

use std::sync::Arc;

use tracing::debug;

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::prompts::classification_prompt;
use crate::pipeline::types::Category;

/// The classifier only needs room for a single token.
const CLASSIFY_MAX_TOKENS: u32 = 10;

/// Classification should be as deterministic as the provider allows.
const CLASSIFY_TEMPERATURE: f32 = 0.0;

/// Classifies inbound queries into details / information requests.
pub struct IntentClassifier {
    llm: Arc<dyn LlmProvider>,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify a query with a single LLM call.
    ///
    /// Unrecognised model output is `Ok(Category::Unclassified)`; only a
    /// failed provider call is an error.
    pub async fn classify(&self, query: &str) -> Result<Category, LlmError> {
        let request = CompletionRequest::new(vec![ChatMessage::user(classification_prompt(query))])
            .with_temperature(CLASSIFY_TEMPERATURE)
            .with_max_tokens(CLASSIFY_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        let category = Category::parse(&response.content);

        debug!(
            raw = %response.content.trim(),
            category = category.label(),
            model = self.llm.model_name(),
            "Classified query"
        );
        Ok(category)
    }
}
