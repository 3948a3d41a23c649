//! Structured observability hooks for the analysis and checkout lifecycle.
//!
//! This module provides:
//! - Request-scoped spans via [`analysis_span`], to `.instrument()` async work
//! - Emission functions for key lifecycle events: start, evidence fetched,
//!   model completed, result extracted, failure, checkout created
//!
//! Events are emitted at `info!` level (configurable via `RUST_LOG`).
//! For JSON output, set `STANCE_LOG_FORMAT=json`.

use serde_json::Number;
use tracing::{error, info, warn};

use crate::extract::ExtractionTier;

/// Fresh identifier for one inbound request.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Span tagged with the request id; attach with `tracing::Instrument`.
///
/// # Example
///
/// ```ignore
/// let span = analysis_span(&request_id);
/// analyzer.analyze(&request).instrument(span).await
/// ```
pub fn analysis_span(request_id: &str) -> tracing::Span {
    tracing::info_span!("stance.analyze", request_id = %request_id)
}

/// Span for a checkout request.
pub fn checkout_span(request_id: &str) -> tracing::Span {
    tracing::info_span!("stance.checkout", request_id = %request_id)
}

/// Emit event: analysis started for a figure/topic pair.
pub fn emit_analysis_started(public_figure: &str, topic: &str) {
    info!(
        event = "analysis.started",
        public_figure = %public_figure,
        topic = %topic,
    );
}

/// Emit event: search returned `count` evidence items.
pub fn emit_evidence_fetched(query: &str, count: usize) {
    info!(event = "analysis.evidence_fetched", query = %query, count = count);
}

/// Emit event: the model answered; logs the raw output for diagnosis.
pub fn emit_model_completed(raw_output: &str) {
    info!(
        event = "analysis.model_completed",
        output_chars = raw_output.chars().count(),
        raw_output = %raw_output,
    );
}

/// Emit event: a verdict was recovered. Fallback is logged at warn level.
pub fn emit_result_extracted(tier: ExtractionTier, score: &Number) {
    if tier == ExtractionTier::Fallback {
        warn!(event = "analysis.result_extracted", tier = %tier, score = %score);
    } else {
        info!(event = "analysis.result_extracted", tier = %tier, score = %score);
    }
}

/// Emit event: the pipeline failed at `stage`.
///
/// This is the only log line for an upstream failure; the HTTP layer maps
/// the error to a response without logging it again.
pub fn emit_analysis_failed(stage: &str, err: &dyn std::fmt::Display) {
    error!(event = "analysis.failed", stage = %stage, error = %err);
}

/// Emit event: a checkout session was created.
pub fn emit_checkout_created(session_id: &str, discount: bool) {
    info!(
        event = "checkout.created",
        session_id = %session_id,
        discount = discount,
    );
}
