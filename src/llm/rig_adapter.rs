//! Bridges rig-core's `CompletionModel` to our `LlmProvider` trait.

use async_trait::async_trait;
use rig::completion::{AssistantContent, CompletionModel, Message};
use tracing::debug;

use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
};

/// Adapter wrapping any rig completion model.
pub struct RigAdapter<M: CompletionModel> {
    model: M,
    model_name: String,
    /// Request field carrying the output bound, for models whose rig request
    /// type drops `max_tokens`.
    token_limit_param: Option<&'static str>,
}

impl<M: CompletionModel> RigAdapter<M> {
    pub fn new(model: M, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
            token_limit_param: None,
        }
    }

    /// Send `max_tokens` as the raw request field `param` instead.
    pub fn with_token_limit_param(mut self, param: &'static str) -> Self {
        self.token_limit_param = Some(param);
        self
    }
}

/// Split our flat message list into rig's (preamble, history, prompt) shape.
///
/// System messages are concatenated into the preamble. The final user message
/// becomes the prompt; earlier user messages are history.
fn split_messages(
    messages: &[ChatMessage],
) -> Result<(Option<String>, Vec<Message>, Message), LlmError> {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();
    let preamble = if system.is_empty() {
        None
    } else {
        Some(system.join("\n\n"))
    };

    let mut turns: Vec<Message> = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| Message::user(m.content.clone()))
        .collect();

    let prompt = turns.pop().ok_or_else(|| LlmError::InvalidResponse {
        provider: "rig".to_string(),
        reason: "completion request has no user message".to_string(),
    })?;

    Ok((preamble, turns, prompt))
}

#[async_trait]
impl<M> LlmProvider for RigAdapter<M>
where
    M: CompletionModel + Send + Sync + 'static,
{
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let (preamble, history, prompt) = split_messages(&request.messages)?;

        let mut builder = self.model.completion_request(prompt);
        if let Some(preamble) = preamble {
            builder = builder.preamble(preamble);
        }
        if !history.is_empty() {
            builder = builder.messages(history);
        }
        match (request.max_tokens, self.token_limit_param) {
            (Some(max_tokens), Some(param)) => {
                let mut params = serde_json::Map::new();
                params.insert(param.to_string(), max_tokens.into());
                builder = builder.additional_params(serde_json::Value::Object(params));
            }
            (Some(max_tokens), None) => {
                builder = builder.max_tokens(u64::from(max_tokens));
            }
            (None, _) => {}
        }
        if let Some(temperature) = request.temperature {
            builder = builder.temperature(f64::from(temperature));
        }

        let response = builder.send().await.map_err(|e| LlmError::RequestFailed {
            provider: self.model_name.clone(),
            reason: e.to_string(),
        })?;

        let content: String = response
            .choice
            .iter()
            .filter_map(|c| match c {
                AssistantContent::Text(text) => Some(text.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        let output_tokens = u32::try_from(response.usage.output_tokens).unwrap_or(u32::MAX);
        let input_tokens = u32::try_from(response.usage.input_tokens).unwrap_or(u32::MAX);

        let finish_reason = match request.max_tokens {
            Some(max) if output_tokens >= max => FinishReason::Length,
            _ => FinishReason::Stop,
        };

        debug!(
            model = %self.model_name,
            input_tokens,
            output_tokens,
            "Completion finished"
        );

        Ok(CompletionResponse {
            content,
            input_tokens,
            output_tokens,
            finish_reason,
        })
    }
}
