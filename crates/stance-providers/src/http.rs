//! Shared reqwest plumbing: client construction and status/body mapping.

use std::time::Duration;

use serde::de::DeserializeOwned;
use stance_core::ProviderFailure;
use tracing::debug;

use crate::error::ClientError;

const USER_AGENT_VALUE: &str = concat!("stance-relay/", env!("CARGO_PKG_VERSION"));

/// Upstream timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT_VALUE)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

pub(crate) fn transport_failure(err: reqwest::Error) -> ProviderFailure {
    if err.is_timeout() {
        ProviderFailure::Timeout
    } else {
        ProviderFailure::Transport {
            message: err.to_string(),
        }
    }
}

/// Body text of a 2xx response; anything else becomes `Status`.
pub(crate) async fn read_success(response: reqwest::Response) -> Result<String, ProviderFailure> {
    let status = response.status();
    let body = response.text().await.map_err(transport_failure)?;

    if status.is_success() {
        Ok(body)
    } else {
        debug!(status = status.as_u16(), "upstream returned non-success status");
        Err(ProviderFailure::Status {
            status: status.as_u16(),
            body,
        })
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ProviderFailure> {
    serde_json::from_str(body).map_err(|err| ProviderFailure::Decode {
        message: err.to_string(),
    })
}

/// Debug placeholder for an optional secret.
pub(crate) fn redacted(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "[redacted]"
    } else {
        "None"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reports_malformed_json() {
        let err = decode::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(err, ProviderFailure::Decode { .. }));
    }

    #[test]
    fn test_redacted_hides_value() {
        assert_eq!(redacted(&Some("sk_live_abc".to_string())), "[redacted]");
        assert_eq!(redacted(&None), "None");
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)).is_ok());
    }
}
