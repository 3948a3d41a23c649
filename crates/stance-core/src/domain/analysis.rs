//! Request, evidence, and result types for a single stance analysis.
//!
//! Everything here is request-scoped: built fresh per inbound request and
//! dropped once the response is written.

use serde::Serialize;
use serde_json::{Number, Value};

use super::error::ValidationError;

/// A validated request to score a public figure's stance on a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub public_figure: String,
    pub topic: String,
}

impl AnalysisRequest {
    pub fn new(public_figure: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            public_figure: public_figure.into(),
            topic: topic.into(),
        }
    }

    /// Parse and validate a raw JSON request body.
    ///
    /// Each field must be present as a non-empty string. Absent, `null`,
    /// empty, or non-string values count as missing.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;
        let object = value.as_object().ok_or(ValidationError::MalformedBody)?;

        let public_figure = required_text(object.get("publicFigure"), "publicFigure")?;
        let topic = required_text(object.get("topic"), "topic")?;

        Ok(Self {
            public_figure,
            topic,
        })
    }
}

fn required_text(value: Option<&Value>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        _ => Err(ValidationError::MissingField { field }),
    }
}

/// One normalized search hit used as grounding context for the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceItem {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl EvidenceItem {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }
}

/// Ordered evidence, in the search provider's relevance order. May be empty.
pub type EvidenceSet = Vec<EvidenceItem>;

/// The structured verdict recovered from model output.
///
/// `score` keeps the model's number as written, so an integer stays an
/// integer on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Nominally -10..=10; not clamped. Always finite.
    pub score: Number,
    pub summary: String,
}

/// Final response body for `POST /api/analyze`.
///
/// Fields are private so that `sources_count` always matches `sources`;
/// build one with [`crate::assemble_response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    stance: Number,
    summary: String,
    sources_count: usize,
    sources: EvidenceSet,
    date_range: String,
}

impl AnalysisResponse {
    pub(crate) fn new(result: AnalysisResult, sources: EvidenceSet, date_range: String) -> Self {
        Self {
            stance: result.score,
            summary: result.summary,
            sources_count: sources.len(),
            sources,
            date_range,
        }
    }

    pub fn stance(&self) -> &Number {
        &self.stance
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn sources_count(&self) -> usize {
        self.sources_count
    }

    pub fn sources(&self) -> &[EvidenceItem] {
        &self.sources
    }

    pub fn date_range(&self) -> &str {
        &self.date_range
    }
}
