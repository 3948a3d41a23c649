//! Stance Core Library
//!
//! Scores a public figure's stance on a topic from recent web evidence:
//! search → prompt → model completion → resilient extraction → response.
//!
//! Transport-specific provider clients live in `stance-providers`; this crate
//! only defines the seams ([`SearchProvider`], [`CompletionProvider`],
//! [`CheckoutProvider`]) and the logic between them.

pub mod assemble;
pub mod domain;
pub mod extract;
pub mod fakes;
pub mod obs;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod telemetry;

pub use assemble::{assemble_response, date_range};

pub use domain::{
    AnalysisRequest, AnalysisResponse, AnalysisResult, AnalyzeError, CheckoutError,
    CheckoutRequest, CheckoutSession, EvidenceItem, EvidenceSet, ModelProviderError,
    ProviderFailure, SearchProviderError, ValidationError,
};

pub use extract::{
    embedded_object, extract, extract_result, fallback_result, Extraction, ExtractionTier,
    FALLBACK_SUMMARY,
};

pub use obs::{
    analysis_span, checkout_span, emit_analysis_failed, emit_analysis_started,
    emit_checkout_created, emit_evidence_fetched, emit_model_completed, emit_result_extracted,
    new_request_id,
};

pub use pipeline::{fetch_evidence, StanceAnalyzer};
pub use prompt::{build_prompt, render_evidence, search_query, MAX_EVIDENCE, SYSTEM_INSTRUCTION};
pub use providers::{CheckoutProvider, CompletionProvider, SearchProvider};
pub use telemetry::{init_tracing, LogFormat};
