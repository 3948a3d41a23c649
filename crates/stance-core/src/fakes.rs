//! In-memory fakes for the provider traits (testing only)
//!
//! Provides `FakeSearchProvider`, `FakeCompletionProvider`, and
//! `FakeCheckoutProvider`. Each answers with a canned outcome and records
//! every call, so tests can assert which upstreams were (or were not) hit.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    CheckoutError, CheckoutRequest, CheckoutSession, EvidenceSet, ModelProviderError,
    ProviderFailure, SearchProviderError,
};
use crate::providers::{CheckoutProvider, CompletionProvider, SearchProvider};

// ---------------------------------------------------------------------------
// FakeSearchProvider
// ---------------------------------------------------------------------------

/// Search provider returning a fixed evidence set or a fixed failure.
#[derive(Debug)]
pub struct FakeSearchProvider {
    outcome: Result<EvidenceSet, ProviderFailure>,
    calls: Mutex<Vec<(String, u8)>>,
}

impl FakeSearchProvider {
    pub fn returning(evidence: EvidenceSet) -> Self {
        Self {
            outcome: Ok(evidence),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: ProviderFailure) -> Self {
        Self {
            outcome: Err(failure),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every query received, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    pub fn last_limit(&self) -> Option<u8> {
        self.calls.lock().unwrap().last().map(|(_, limit)| *limit)
    }
}

#[async_trait]
impl SearchProvider for FakeSearchProvider {
    async fn search(&self, query: &str, limit: u8) -> Result<EvidenceSet, SearchProviderError> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        self.outcome.clone().map_err(SearchProviderError)
    }
}

// ---------------------------------------------------------------------------
// FakeCompletionProvider
// ---------------------------------------------------------------------------

/// Completion provider replying with fixed text or a fixed failure.
#[derive(Debug)]
pub struct FakeCompletionProvider {
    outcome: Result<String, ProviderFailure>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletionProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: ProviderFailure) -> Self {
        Self {
            outcome: Err(failure),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ModelProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.clone().map_err(ModelProviderError)
    }
}

// ---------------------------------------------------------------------------
// FakeCheckoutProvider
// ---------------------------------------------------------------------------

/// Checkout provider creating sessions with a fixed id, or failing.
#[derive(Debug)]
pub struct FakeCheckoutProvider {
    outcome: Result<String, ProviderFailure>,
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl FakeCheckoutProvider {
    pub fn creating(session_id: &str) -> Self {
        Self {
            outcome: Ok(session_id.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: ProviderFailure) -> Self {
        Self {
            outcome: Err(failure),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutProvider for FakeCheckoutProvider {
    async fn create_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        self.requests.lock().unwrap().push(request);
        self.outcome
            .clone()
            .map(|session_id| CheckoutSession { session_id })
            .map_err(CheckoutError)
    }
}
