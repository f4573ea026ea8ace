//! Configuration types, read from the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::llm::{LlmBackend, LlmConfig};
use crate::pipeline::responder::DEFAULT_REPLY_MAX_TOKENS;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// LLM backend, credential and model.
    pub llm: LlmConfig,
    /// Host to bind the HTTP server on.
    pub host: String,
    /// Port to bind the HTTP server on.
    pub port: u16,
    /// SQLite file holding the `phone_data` table.
    pub db_path: PathBuf,
    /// Upper bound on generated reply length.
    pub max_reply_tokens: u32,
    /// Override for the organisation summary used on information queries.
    pub org_summary: Option<String>,
}

impl BridgeConfig {
    /// Build configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend: LlmBackend = get("QUERY_BRIDGE_LLM_BACKEND")
            .as_deref()
            .unwrap_or("openai")
            .parse()?;

        let api_key = get(backend.api_key_var())
            .ok_or_else(|| ConfigError::MissingEnvVar(backend.api_key_var().to_string()))?;

        let model =
            get("QUERY_BRIDGE_MODEL").unwrap_or_else(|| backend.default_model().to_string());

        let port = match get("QUERY_BRIDGE_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "QUERY_BRIDGE_PORT".to_string(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => 4000,
        };

        let max_reply_tokens = match get("QUERY_BRIDGE_MAX_REPLY_TOKENS") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "QUERY_BRIDGE_MAX_REPLY_TOKENS".to_string(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_REPLY_MAX_TOKENS,
        };

        Ok(Self {
            llm: LlmConfig {
                backend,
                api_key: secrecy::SecretString::from(api_key),
                model,
            },
            host: get("QUERY_BRIDGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            db_path: get("QUERY_BRIDGE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/phone.db")),
            max_reply_tokens,
            org_summary: get("QUERY_BRIDGE_ORG_SUMMARY"),
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "QUERY_BRIDGE_HOST".to_string(),
                message: format!("{}: {e}", self.host),
            })
    }
}
