//! The stance-analysis pipeline.
//!
//! Evidence fetch → prompt → completion → extraction → assembly, strictly in
//! sequence. A provider failure stops the pipeline; no partial response is
//! produced. Malformed model output is not a failure (see [`crate::extract`]).

use std::sync::Arc;

use chrono::Local;

use crate::assemble::assemble_response;
use crate::domain::{
    AnalysisRequest, AnalysisResponse, AnalyzeError, EvidenceSet, SearchProviderError,
};
use crate::extract::extract;
use crate::obs;
use crate::prompt::{build_prompt, search_query, MAX_EVIDENCE};
use crate::providers::{CompletionProvider, SearchProvider};

/// Search for `"<public_figure> <topic>"`, returning up to ten items in
/// provider order.
pub async fn fetch_evidence(
    search: &dyn SearchProvider,
    public_figure: &str,
    topic: &str,
) -> Result<EvidenceSet, SearchProviderError> {
    let query = search_query(public_figure, topic);
    let mut evidence = search.search(&query, MAX_EVIDENCE).await?;
    evidence.truncate(MAX_EVIDENCE as usize);
    obs::emit_evidence_fetched(&query, evidence.len());
    Ok(evidence)
}

/// Runs analyses against injected providers.
///
/// Holds only shared, read-only handles, so one instance serves every
/// concurrent request.
#[derive(Clone)]
pub struct StanceAnalyzer {
    search: Arc<dyn SearchProvider>,
    model: Arc<dyn CompletionProvider>,
}

impl StanceAnalyzer {
    pub fn new(search: Arc<dyn SearchProvider>, model: Arc<dyn CompletionProvider>) -> Self {
        Self { search, model }
    }

    /// Run the full pipeline for one validated request.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalyzeError> {
        obs::emit_analysis_started(&request.public_figure, &request.topic);

        let evidence = fetch_evidence(
            self.search.as_ref(),
            &request.public_figure,
            &request.topic,
        )
        .await
        .map_err(|err| {
            obs::emit_analysis_failed("search", &err);
            err
        })?;

        let prompt = build_prompt(&evidence);

        let raw_output = self.model.complete(&prompt).await.map_err(|err| {
            obs::emit_analysis_failed("model", &err);
            err
        })?;
        obs::emit_model_completed(&raw_output);

        let extraction = extract(&raw_output);
        obs::emit_result_extracted(extraction.tier, &extraction.result.score);

        Ok(assemble_response(
            extraction.result,
            evidence,
            Local::now().date_naive(),
        ))
    }
}
