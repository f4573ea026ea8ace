//! LLM integration for the query bridge.
//!
//! Supports:
//! - **OpenAI**: Chat Completions API via rig-core (default)
//! - **Anthropic**: Direct API access via rig-core
//!
//! Uses the rig-core crate for HTTP transport and the `RigAdapter` to bridge
//! rig's `CompletionModel` trait to our `LlmProvider` trait.

pub mod provider;
mod rig_adapter;

pub use provider::*;
pub use rig_adapter::RigAdapter;

use std::str::FromStr;
use std::sync::Arc;

use rig::client::CompletionClient;
use secrecy::ExposeSecret;

use crate::error::{ConfigError, LlmError};

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    Anthropic,
    OpenAi,
}

impl LlmBackend {
    /// Environment variable holding the API key for this backend.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmBackend::Anthropic => "ANTHROPIC_API_KEY",
            LlmBackend::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::Anthropic => "claude-3-5-haiku-latest",
            LlmBackend::OpenAi => "gpt-4o-mini",
        }
    }
}

impl FromStr for LlmBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmBackend::OpenAi),
            "anthropic" => Ok(LlmBackend::Anthropic),
            other => Err(ConfigError::InvalidValue {
                key: "QUERY_BRIDGE_LLM_BACKEND".to_string(),
                message: format!("unknown backend '{other}' (expected openai or anthropic)"),
            }),
        }
    }
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.backend {
        LlmBackend::Anthropic => create_anthropic_provider(config),
        LlmBackend::OpenAi => create_openai_provider(config),
    }
}

fn create_anthropic_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.api_key.expose_secret()).map_err(|e| {
            LlmError::RequestFailed {
                provider: "anthropic".to_string(),
                reason: format!("Failed to create Anthropic client: {}", e),
            }
        })?;

    let model = client.completion_model(&config.model);
    tracing::info!("Using Anthropic (model: {})", config.model);
    Ok(Arc::new(RigAdapter::new(model, &config.model)))
}

fn create_openai_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    use rig::providers::openai;

    let client: openai::CompletionsClient =
        openai::CompletionsClient::new(config.api_key.expose_secret()).map_err(|e| {
            LlmError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    tracing::info!("Using OpenAI (model: {})", config.model);
    Ok(openai_chat_provider(&client, &config.model))
}

/// OpenAI Chat Completions model.
///
/// rig's chat request type has no `max_tokens` field, so the bound is sent
/// as a raw `max_tokens` parameter. The Responses API is not used: it
/// rejects output bounds below 16, which the classifier needs.
fn openai_chat_provider(
    client: &rig::providers::openai::CompletionsClient,
    model: &str,
) -> Arc<dyn LlmProvider> {
    let model_handle = client.completion_model(model);
    Arc::new(RigAdapter::new(model_handle, model).with_token_limit_param("max_tokens"))
}
