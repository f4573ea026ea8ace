//! Response generator — one LLM call turning a query plus context into a reply.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, FinishReason, LlmProvider};
use crate::pipeline::prompts::{RESPONDER_SYSTEM_PROMPT, responder_user_prompt};

/// Default upper bound on generated reply length.
pub const DEFAULT_REPLY_MAX_TOKENS: u32 = 300;

/// Generates natural-language replies.
pub struct ResponseGenerator {
    llm: Arc<dyn LlmProvider>,
    max_tokens: u32,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            max_tokens: DEFAULT_REPLY_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Generate a reply for `query` grounded on `context`.
    pub async fn generate(&self, query: &str, context: &str) -> Result<String, LlmError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(RESPONDER_SYSTEM_PROMPT),
            ChatMessage::user(responder_user_prompt(query, context)),
        ])
        .with_max_tokens(self.max_tokens);

        let response = self.llm.complete(request).await?;

        if response.finish_reason == FinishReason::Length {
            warn!(
                max_tokens = self.max_tokens,
                "Reply hit the token limit and may be truncated"
            );
        }

        debug!(
            output_tokens = response.output_tokens,
            chars = response.content.len(),
            "Generated reply"
        );
        Ok(response.content)
    }
}
