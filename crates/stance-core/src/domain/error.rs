//! Error taxonomy for stance analysis.
//!
//! Provider errors keep the upstream diagnostics (status, body, transport
//! message) so they can be logged; the HTTP boundary collapses them into a
//! fixed external body.

/// Errors produced when an inbound request fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("request body is not a JSON object")]
    MalformedBody,

    #[error("request body is not declared as application/json")]
    NotJson,
}

/// What went wrong while talking to an upstream provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderFailure {
    #[error("credential {name} is not configured")]
    MissingCredential { name: &'static str },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed upstream response: {message}")]
    Decode { message: String },
}

impl ProviderFailure {
    /// Upstream HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Web-search provider failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("search provider error: {0}")]
pub struct SearchProviderError(#[from] pub ProviderFailure);

/// Language-model provider failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model provider error: {0}")]
pub struct ModelProviderError(#[from] pub ProviderFailure);

/// Payment provider failure while creating a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("checkout provider error: {0}")]
pub struct CheckoutError(#[from] pub ProviderFailure);

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SearchProvider(#[from] SearchProviderError),

    #[error(transparent)]
    ModelProvider(#[from] ModelProviderError),
}

impl AnalyzeError {
    /// Short name of the stage that failed, used as a log field.
    pub fn stage(&self) -> &'static str {
        match self {
            AnalyzeError::Validation(_) => "validation",
            AnalyzeError::SearchProvider(_) => "search",
            AnalyzeError::ModelProvider(_) => "model",
        }
    }

    /// Whether the caller is at fault (as opposed to an upstream).
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalyzeError::Validation(_))
    }
}
