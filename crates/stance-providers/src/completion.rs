//! OpenAI chat-completions client
//!
//! Sends the stance prompt as a single user turn behind a fixed JSON-only
//! system instruction, at low temperature with a bounded token budget.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use stance_core::{CompletionProvider, ModelProviderError, ProviderFailure, SYSTEM_INSTRUCTION};
use tracing::debug;

use crate::error::ClientError;
use crate::http::{
    build_client, decode, read_success, redacted, transport_failure, DEFAULT_TIMEOUT_SECS,
};

/// Production API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// OpenAI client configuration
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Base URL; `/v1/chat/completions` is appended
    pub base_url: String,
    /// API key (`OPENAI_API_KEY`)
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    /// Build from a key lookup (usually the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        OpenAiConfig {
            base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            api_key: lookup("OPENAI_API_KEY"),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// OpenAI chat-completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ClientError> {
        let http_client = build_client(config.timeout)?;
        Ok(OpenAiClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": prompt},
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderFailure::MissingCredential {
                name: "OPENAI_API_KEY",
            })?;

        debug!(model = %self.config.model, prompt_chars = prompt.len(), "requesting completion");

        let response = self
            .http_client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(transport_failure)?;

        let body = read_success(response).await?;
        let parsed: Value = decode(&body)?;

        let content = parsed
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderFailure::Decode {
                message: "response missing choices[0].message.content".to_string(),
            })?;

        Ok(content.to_string())
    }
}
