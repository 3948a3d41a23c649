//! Final response assembly.

use chrono::NaiveDate;

use crate::domain::{AnalysisResponse, AnalysisResult, EvidenceSet};

/// Human-readable date stamp, e.g. `As of Oct 16, 2026`.
pub fn date_range(today: NaiveDate) -> String {
    format!("As of {}", today.format("%b %-d, %Y"))
}

/// Combine the verdict and its evidence into the response body.
///
/// The score is passed through unchanged, even when it falls outside the
/// nominal -10..=10 range.
pub fn assemble_response(
    result: AnalysisResult,
    evidence: EvidenceSet,
    today: NaiveDate,
) -> AnalysisResponse {
    AnalysisResponse::new(result, evidence, date_range(today))
}
