//! End-to-end analysis through the public API with fake upstreams.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Number;
use stance_core::fakes::{FakeCompletionProvider, FakeSearchProvider};
use stance_core::{
    assemble_response, build_prompt, extract, AnalysisRequest, AnalysisResult, EvidenceItem,
    ExtractionTier, StanceAnalyzer, FALLBACK_SUMMARY, MAX_EVIDENCE,
};

fn evidence(n: usize) -> Vec<EvidenceItem> {
    (0..n)
        .map(|i| {
            EvidenceItem::new(
                format!("Title {i}"),
                format!("Snippet {i}"),
                format!("https://news.example/{i}"),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_prompt_carries_every_evidence_item_in_order() {
    let search = Arc::new(FakeSearchProvider::returning(evidence(3)));
    let model = Arc::new(FakeCompletionProvider::replying(
        r#"{"score": -4, "summary": "Opposes it."}"#,
    ));
    let analyzer = StanceAnalyzer::new(search.clone(), model.clone());

    let response = analyzer
        .analyze(&AnalysisRequest::new("Jane Doe", "rent control"))
        .await
        .unwrap();

    assert_eq!(response.stance(), &Number::from(-4));
    assert_eq!(response.summary(), "Opposes it.");
    assert_eq!(search.last_limit(), Some(MAX_EVIDENCE));

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], build_prompt(&evidence(3)));

    let first = prompts[0].find("Title 0").unwrap();
    let last = prompts[0].find("Title 2").unwrap();
    assert!(first < last);
}

#[tokio::test]
async fn test_sources_count_always_matches_sources() {
    for n in [0, 1, 7, 10] {
        let analyzer = StanceAnalyzer::new(
            Arc::new(FakeSearchProvider::returning(evidence(n))),
            Arc::new(FakeCompletionProvider::replying("no json here")),
        );

        let response = analyzer
            .analyze(&AnalysisRequest::new("A", "B"))
            .await
            .unwrap();

        assert_eq!(response.sources_count(), n);
        assert_eq!(response.sources().len(), n);
        assert_eq!(response.summary(), FALLBACK_SUMMARY);
    }
}

#[test]
fn test_extraction_tiers_on_typical_model_output() {
    let cases = [
        (r#"{"score": 7, "summary": "Supports it."}"#, ExtractionTier::Direct, "7"),
        (
            "Sure! {\"score\": -3, \"summary\": \"Opposes.\"} Hope this helps.",
            ExtractionTier::Embedded,
            "-3",
        ),
        (
            "```json\n{\"score\": 2, \"summary\": \"Mixed.\"}\n```",
            ExtractionTier::Embedded,
            "2",
        ),
        ("I cannot determine this.", ExtractionTier::Fallback, "0"),
    ];

    for (raw, tier, score) in cases {
        let extraction = extract(raw);
        assert_eq!(extraction.tier, tier, "raw: {raw:?}");
        assert_eq!(extraction.result.score.to_string(), score, "raw: {raw:?}");
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let raw = "prefix {\"score\": 1.5, \"summary\": \"s\"} suffix";
    assert_eq!(extract(raw), extract(raw));
}

#[test]
fn test_assembly_serializes_wire_shape() {
    let response = assemble_response(
        AnalysisResult {
            score: Number::from(12),
            summary: "Off the scale.".to_string(),
        },
        evidence(1),
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
    );

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "stance": 12,
            "summary": "Off the scale.",
            "sourcesCount": 1,
            "sources": [{
                "title": "Title 0",
                "snippet": "Snippet 0",
                "link": "https://news.example/0"
            }],
            "dateRange": "As of Oct 16, 2026"
        })
    );
}

#[test]
fn test_integer_score_stays_integer_on_the_wire() {
    let response = assemble_response(
        stance_core::extract_result(r#"{"score": 5, "summary": "Positive"}"#),
        Vec::new(),
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
    );

    assert_eq!(
        serde_json::to_string(&response).unwrap(),
        r#"{"stance":5,"summary":"Positive","sourcesCount":0,"sources":[],"dateRange":"As of Oct 16, 2026"}"#
    );
}
