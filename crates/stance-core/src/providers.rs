//! Upstream provider seams.
//!
//! These traits define the three external collaborators:
//! - `SearchProvider`: web search returning ranked hits
//! - `CompletionProvider`: chat-completion model returning raw text
//! - `CheckoutProvider`: payment provider creating checkout sessions
//!
//! All traits are async and transport-agnostic. HTTP implementations live in
//! `stance-providers`; in-memory fakes are in the `fakes` module.

use async_trait::async_trait;

use crate::domain::{
    CheckoutError, CheckoutRequest, CheckoutSession, EvidenceSet, ModelProviderError,
    SearchProviderError,
};

/// Web-search provider.
///
/// Guarantees:
/// - returns at most `limit` items, in the provider's ranking order
/// - zero hits is `Ok(vec![])`, never an error
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u8) -> Result<EvidenceSet, SearchProviderError>;
}

/// Chat-completion model.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` as the single user turn and return the primary
    /// completion's text, verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, ModelProviderError>;
}

/// Payment provider.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    async fn create_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError>;
}
