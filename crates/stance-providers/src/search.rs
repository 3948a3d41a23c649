//! Google Custom Search client
//!
//! Issues one `customsearch/v1` query per analysis and normalizes the hits
//! into evidence items, keeping the provider's ranking order.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use stance_core::{
    EvidenceItem, EvidenceSet, ProviderFailure, SearchProvider, SearchProviderError,
};
use tracing::debug;

use crate::error::ClientError;
use crate::http::{
    build_client, decode, read_success, redacted, transport_failure, DEFAULT_TIMEOUT_SECS,
};

/// Production Custom Search endpoint.
pub const GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search configuration
#[derive(Clone)]
pub struct GoogleSearchConfig {
    /// Full endpoint URL (overridable for tests and proxies)
    pub endpoint: String,
    /// API key (`GOOGLE_API_KEY`)
    pub api_key: Option<String>,
    /// Programmable search engine id (`GOOGLE_SEARCH_ENGINE_ID`)
    pub engine_id: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GoogleSearchConfig {
    fn default() -> Self {
        GoogleSearchConfig {
            endpoint: GOOGLE_SEARCH_URL.to_string(),
            api_key: None,
            engine_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for GoogleSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redacted(&self.api_key))
            .field("engine_id", &self.engine_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GoogleSearchConfig {
    /// Build from a key lookup (usually the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        GoogleSearchConfig {
            endpoint: lookup("GOOGLE_SEARCH_BASE_URL")
                .unwrap_or_else(|| GOOGLE_SEARCH_URL.to_string()),
            api_key: lookup("GOOGLE_API_KEY"),
            engine_id: lookup("GOOGLE_SEARCH_ENGINE_ID"),
            ..Default::default()
        }
    }

    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Set credentials
    pub fn with_credentials(mut self, api_key: &str, engine_id: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self.engine_id = Some(engine_id.to_string());
        self
    }

    /// Point at a different endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl From<SearchHit> for EvidenceItem {
    fn from(hit: SearchHit) -> Self {
        EvidenceItem {
            title: hit.title.unwrap_or_default(),
            snippet: hit.snippet.unwrap_or_default(),
            link: hit.link.unwrap_or_default(),
        }
    }
}

/// Google Custom Search client
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    config: GoogleSearchConfig,
    http_client: reqwest::Client,
}

impl GoogleSearchClient {
    pub fn new(config: GoogleSearchConfig) -> Result<Self, ClientError> {
        let http_client = build_client(config.timeout)?;
        Ok(GoogleSearchClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GoogleSearchConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str, limit: u8) -> Result<EvidenceSet, SearchProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderFailure::MissingCredential {
                name: "GOOGLE_API_KEY",
            })?;
        let engine_id = self
            .config
            .engine_id
            .as_deref()
            .ok_or(ProviderFailure::MissingCredential {
                name: "GOOGLE_SEARCH_ENGINE_ID",
            })?;

        debug!(query = %query, limit = limit, "running web search");

        let num = limit.to_string();
        let response = self
            .http_client
            .get(&self.config.endpoint)
            .query(&[
                ("q", query),
                ("cx", engine_id),
                ("key", api_key),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(transport_failure)?;

        let body = read_success(response).await?;
        let parsed: SearchResponse = decode(&body)?;

        Ok(parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .map(EvidenceItem::from)
            .collect())
    }
}
