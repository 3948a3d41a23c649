//! Error types for stance-providers

use thiserror::Error;

/// Errors raised while constructing a provider client.
///
/// Request-time failures are reported through the `stance-core` provider
/// error types instead.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The underlying HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Build(err.to_string())
    }
}
