//! Process configuration, read once at startup.
//!
//! The resulting [`Config`] is immutable and handed to each client
//! constructor; request handlers never read the environment.

use std::time::Duration;

use stance_providers::{GoogleSearchConfig, OpenAiConfig, StripeConfig, DEFAULT_TIMEOUT_SECS};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://pinionate.com";

/// Configuration errors detected at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// HTTP front-end settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Single origin allowed by CORS (`STANCE_ALLOWED_ORIGIN`)
    pub allowed_origin: String,
}

/// Whether a credential was supplied, for the startup report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStatus {
    pub name: &'static str,
    pub loaded: bool,
    /// Only meaningful for the payment key: `Some(true)` for a live key.
    pub live: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub search: GoogleSearchConfig,
    pub model: OpenAiConfig,
    pub checkout: StripeConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup. Missing credentials are not an error here;
    /// the affected upstream call fails at request time instead.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout = upstream_timeout(lookup("STANCE_UPSTREAM_TIMEOUT_SECS"))?;

        Ok(Config {
            server: ServerConfig {
                allowed_origin: lookup("STANCE_ALLOWED_ORIGIN")
                    .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            },
            search: GoogleSearchConfig::from_lookup(&lookup).with_timeout(timeout),
            model: OpenAiConfig::from_lookup(&lookup).with_timeout(timeout),
            checkout: StripeConfig::from_lookup(&lookup).with_timeout(timeout),
        })
    }

    pub fn credential_report(&self) -> Vec<CredentialStatus> {
        vec![
            CredentialStatus {
                name: "GOOGLE_SEARCH_ENGINE_ID",
                loaded: self.search.engine_id.is_some(),
                live: None,
            },
            CredentialStatus {
                name: "GOOGLE_API_KEY",
                loaded: self.search.api_key.is_some(),
                live: None,
            },
            CredentialStatus {
                name: "OPENAI_API_KEY",
                loaded: self.model.api_key.is_some(),
                live: None,
            },
            CredentialStatus {
                name: "STRIPE_SECRET_KEY",
                loaded: self.checkout.secret_key.is_some(),
                live: Some(self.checkout.is_live_key()),
            },
        ]
    }

    /// Log which credentials are present. Values are never logged.
    pub fn log_credentials(&self) {
        for status in self.credential_report() {
            match (status.loaded, status.live) {
                (false, _) => warn!(credential = status.name, "credential missing"),
                (true, Some(false)) => {
                    warn!(credential = status.name, "credential loaded (not a live key)")
                }
                (true, _) => info!(credential = status.name, "credential loaded"),
            }
        }
    }
}

fn upstream_timeout(raw: Option<String>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            key: "STANCE_UPSTREAM_TIMEOUT_SECS",
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.allowed_origin, DEFAULT_ALLOWED_ORIGIN);
        assert_eq!(config.search.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.credential_report().iter().all(|s| !s.loaded));
    }

    #[test]
    fn test_credentials_and_timeout_flow_into_clients() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "g-key"),
            ("GOOGLE_SEARCH_ENGINE_ID", "cx"),
            ("OPENAI_API_KEY", "sk-openai"),
            ("STRIPE_SECRET_KEY", "sk_live_abc"),
            ("STANCE_UPSTREAM_TIMEOUT_SECS", "12"),
            ("STANCE_ALLOWED_ORIGIN", "http://localhost:5173"),
        ]))
        .unwrap();

        assert_eq!(config.search.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.model.api_key.as_deref(), Some("sk-openai"));
        assert_eq!(config.model.timeout, Duration::from_secs(12));
        assert_eq!(config.checkout.timeout, Duration::from_secs(12));
        assert_eq!(config.server.allowed_origin, "http://localhost:5173");

        let report = config.credential_report();
        assert!(report.iter().all(|s| s.loaded));
        let stripe = report
            .iter()
            .find(|s| s.name == "STRIPE_SECRET_KEY")
            .unwrap();
        assert_eq!(stripe.live, Some(true));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        for bad in ["abc", "0", "-5"] {
            let err = Config::from_lookup(lookup_from(&[("STANCE_UPSTREAM_TIMEOUT_SECS", bad)]))
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidValue {
                    key: "STANCE_UPSTREAM_TIMEOUT_SECS",
                    value: bad.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-very-secret")]))
            .unwrap();
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
