//! Domain models for stance analysis.
//!
//! - `AnalysisRequest` / `AnalysisResponse`: the analyze endpoint contract
//! - `EvidenceItem`: one normalized search hit
//! - `AnalysisResult`: the `{score, summary}` verdict recovered from the model
//! - `CheckoutRequest` / `CheckoutSession`: the checkout endpoint contract

pub mod analysis;
pub mod checkout;
pub mod error;

pub use analysis::{AnalysisRequest, AnalysisResponse, AnalysisResult, EvidenceItem, EvidenceSet};
pub use checkout::{CheckoutRequest, CheckoutSession};
pub use error::{
    AnalyzeError, CheckoutError, ModelProviderError, ProviderFailure, SearchProviderError,
    ValidationError,
};
