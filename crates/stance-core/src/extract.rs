//! Recovery of a `{score, summary}` verdict from raw model output.
//!
//! Model output is untrusted text: it may be clean JSON, JSON wrapped in
//! prose or markdown fences, or no JSON at all. [`extract_result`] never
//! fails. It tries, in order:
//!
//! 1. **Direct**: the whole text parsed as a JSON object.
//! 2. **Embedded**: the first `{` up to the nearest `}` after it, parsed as a
//!    JSON object.
//! 3. **Fallback**: `{score: 0, summary: "Could not parse AI response."}`.
//!
//! A tier only succeeds if the object exposes a finite numeric `score` and a
//! non-empty string `summary`; other fields are ignored.
//!
//! ## Known limitation
//!
//! The embedded scan is non-greedy, not brace-balanced. Output like
//! `{"meta": {"x": 1}, "score": 2, "summary": "s"}` yields the candidate
//! `{"meta": {"x": 1}`, which does not parse, so the result degrades to the
//! fallback. A balanced scanner would recover it but would change behavior
//! for such inputs, so it is not used here.

use serde_json::{Number, Value};
use tracing::debug;

use crate::domain::AnalysisResult;

/// Summary substituted when no verdict can be recovered.
pub const FALLBACK_SUMMARY: &str = "Could not parse AI response.";

/// Which strategy produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    Direct,
    Embedded,
    Fallback,
}

impl ExtractionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionTier::Direct => "direct",
            ExtractionTier::Embedded => "embedded",
            ExtractionTier::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An extracted result tagged with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub result: AnalysisResult,
    pub tier: ExtractionTier,
}

/// The degraded result returned when nothing usable is found.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        score: Number::from(0),
        summary: FALLBACK_SUMMARY.to_string(),
    }
}

/// Parse raw model output into a result. Never fails.
pub fn extract_result(raw: &str) -> AnalysisResult {
    extract(raw).result
}

/// Like [`extract_result`], but also reports which tier succeeded.
pub fn extract(raw: &str) -> Extraction {
    if let Some(result) = parse_verdict(raw) {
        return Extraction {
            result,
            tier: ExtractionTier::Direct,
        };
    }

    match embedded_object(raw) {
        Some(candidate) => {
            if let Some(result) = parse_verdict(candidate) {
                return Extraction {
                    result,
                    tier: ExtractionTier::Embedded,
                };
            }
            debug!(candidate = %candidate, "embedded payload did not yield a verdict");
        }
        None => debug!("no brace-delimited payload in model output"),
    }

    Extraction {
        result: fallback_result(),
        tier: ExtractionTier::Fallback,
    }
}

/// First `{` through the nearest `}` after it, inclusive.
///
/// Equivalent to the leftmost match of the non-greedy pattern `\{[\s\S]*?\}`:
/// if the first `{` has no `}` after it, no later `{` does either.
pub fn embedded_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let len = raw[start..].find('}')?;
    Some(&raw[start..=start + len])
}

fn parse_verdict(text: &str) -> Option<AnalysisResult> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let score = match object.get("score")? {
        Value::Number(score) if score.as_f64().map_or(false, f64::is_finite) => score.clone(),
        _ => return None,
    };
    let summary = object
        .get("summary")
        .and_then(Value::as_str)
        .filter(|summary| !summary.is_empty())?;

    Some(AnalysisResult {
        score,
        summary: summary.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(score: impl Into<Number>, summary: &str) -> AnalysisResult {
        AnalysisResult {
            score: score.into(),
            summary: summary.to_string(),
        }
    }

    fn fractional(score: f64) -> Number {
        Number::from_f64(score).unwrap()
    }

    #[test]
    fn test_direct_json() {
        let raw = r#"{"score": 7, "summary": "Strongly supportive"}"#;
        let extraction = extract(raw);
        assert_eq!(extraction.tier, ExtractionTier::Direct);
        assert_eq!(extraction.result, verdict(7, "Strongly supportive"));
    }

    #[test]
    fn test_direct_json_with_whitespace_and_extra_fields() {
        let raw = "\n  {\"score\": -4.5, \"summary\": \"Skeptical\", \"confidence\": 0.8}\n";
        let extraction = extract(raw);
        assert_eq!(extraction.tier, ExtractionTier::Direct);
        assert_eq!(extraction.result, verdict(fractional(-4.5), "Skeptical"));
    }

    #[test]
    fn test_embedded_in_prose() {
        let raw = "Sure! Here's the result: {\"score\": 5, \"summary\": \"Positive\"} Hope that helps.";
        let extraction = extract(raw);
        assert_eq!(extraction.tier, ExtractionTier::Embedded);
        assert_eq!(extraction.result, verdict(5, "Positive"));
    }

    #[test]
    fn test_embedded_in_markdown_fence() {
        let raw = "```json\n{\n  \"score\": -8,\n  \"summary\": \"Firmly opposed\"\n}\n```";
        let extraction = extract(raw);
        assert_eq!(extraction.tier, ExtractionTier::Embedded);
        assert_eq!(extraction.result, verdict(-8, "Firmly opposed"));
    }

    #[test]
    fn test_no_braces_falls_back() {
        let extraction = extract("I cannot determine this.");
        assert_eq!(extraction.tier, ExtractionTier::Fallback);
        assert_eq!(extraction.result, verdict(0, FALLBACK_SUMMARY));
    }

    #[test]
    fn test_unparseable_braces_fall_back() {
        let raw = "Result: {score: five, summary: unclear}";
        assert_eq!(extract_result(raw), fallback_result());
    }

    #[test]
    fn test_unclosed_brace_falls_back() {
        assert_eq!(extract_result("{\"score\": 3, \"summary\": \"cut off"), fallback_result());
    }

    #[test]
    fn test_nested_object_mis_extracts_to_fallback() {
        let raw = r#"Here: {"meta": {"model": "x"}, "score": 2, "summary": "Mixed"} done"#;
        assert_eq!(embedded_object(raw), Some(r#"{"meta": {"model": "x"}"#));
        assert_eq!(extract(raw).tier, ExtractionTier::Fallback);
    }

    #[test]
    fn test_nested_object_as_whole_output_parses_directly() {
        let raw = r#"{"meta": {"model": "x"}, "score": 2, "summary": "Mixed"}"#;
        let extraction = extract(raw);
        assert_eq!(extraction.tier, ExtractionTier::Direct);
        assert_eq!(extraction.result, verdict(2, "Mixed"));
    }

    #[test]
    fn test_first_object_wins() {
        let raw = r#"{"score": 1, "summary": "first"} and {"score": 9, "summary": "second"}"#;
        let extraction = extract(raw);
        assert_eq!(extraction.tier, ExtractionTier::Embedded);
        assert_eq!(extraction.result, verdict(1, "first"));
    }

    #[test]
    fn test_missing_fields_fall_through() {
        assert_eq!(extract_result(r#"{"score": 4}"#), fallback_result());
        assert_eq!(extract_result(r#"{"summary": "No score"}"#), fallback_result());
        assert_eq!(
            extract_result(r#"{"score": "5", "summary": "string score"}"#),
            fallback_result()
        );
        assert_eq!(extract_result(r#"{"score": 5, "summary": ""}"#), fallback_result());
    }

    #[test]
    fn test_out_of_range_score_passes_through() {
        let raw = r#"{"score": 42, "summary": "Off the charts"}"#;
        assert_eq!(extract_result(raw), verdict(42, "Off the charts"));
    }

    #[test]
    fn test_score_keeps_its_written_form() {
        let integer = extract_result(r#"{"score": 5, "summary": "Positive"}"#);
        assert_eq!(serde_json::to_string(&integer.score).unwrap(), "5");

        let float = extract_result(r#"{"score": 5.0, "summary": "Positive"}"#);
        assert_eq!(serde_json::to_string(&float.score).unwrap(), "5.0");

        assert_eq!(serde_json::to_string(&fallback_result().score).unwrap(), "0");
    }

    #[test]
    fn test_non_object_json_falls_back() {
        assert_eq!(extract(r#"[1, 2, 3]"#).tier, ExtractionTier::Fallback);
        assert_eq!(extract("\"just a string\"").tier, ExtractionTier::Fallback);
        assert_eq!(extract("").tier, ExtractionTier::Fallback);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        for raw in [
            r#"{"score": 3, "summary": "ok"}"#,
            "prefix {\"score\": -2, \"summary\": \"meh\"} suffix",
            "nothing here",
        ] {
            assert_eq!(extract(raw), extract(raw));
        }
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(ExtractionTier::Embedded.to_string(), "embedded");
    }
}
