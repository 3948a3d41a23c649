//! Prompt construction for the stance classifier.
//!
//! The output directive is what the result extractor expects the model to
//! attempt. Keep the wording byte-for-byte stable.

use crate::domain::EvidenceItem;

/// Maximum number of search hits requested per analysis.
pub const MAX_EVIDENCE: u8 = 10;

/// System turn sent ahead of every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant. Respond only in valid JSON.";

const FRAMING: &str = "\nYou are a data-only JSON generator.\n\n\
Analyze the stance of the public figure on the given topic based on these recent articles:\n\n";

const OUTPUT_DIRECTIVE: &str = "\n\nOutput ONLY and EXACTLY this JSON format:\n\n\
{\n  \"score\": number from -10 to 10,\n  \"summary\": \"short summary\"\n}\n";

/// Search query for a figure/topic pair: a literal space join.
pub fn search_query(public_figure: &str, topic: &str) -> String {
    format!("{} {}", public_figure, topic)
}

/// Render one evidence item as a `Title/Snippet/Link` block.
pub fn render_evidence(item: &EvidenceItem) -> String {
    format!(
        "Title: {}\nSnippet: {}\nLink: {}",
        item.title, item.snippet, item.link
    )
}

/// Build the user prompt from the evidence set. Pure and deterministic.
pub fn build_prompt(evidence: &[EvidenceItem]) -> String {
    let blocks = evidence
        .iter()
        .map(render_evidence)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}{}", FRAMING, blocks, OUTPUT_DIRECTIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_is_space_joined() {
        assert_eq!(search_query("Jane Doe", "climate"), "Jane Doe climate");
        assert_eq!(
            search_query("  Jane ", "a&b?c"),
            "  Jane  a&b?c",
            "no trimming or escaping"
        );
    }

    #[test]
    fn test_build_prompt_exact_text() {
        let evidence = vec![
            EvidenceItem::new("First", "Snippet one", "https://a.example"),
            EvidenceItem::new("Second", "Snippet two", "https://b.example"),
        ];

        let expected = "
You are a data-only JSON generator.

Analyze the stance of the public figure on the given topic based on these recent articles:

Title: First
Snippet: Snippet one
Link: https://a.example

Title: Second
Snippet: Snippet two
Link: https://b.example

Output ONLY and EXACTLY this JSON format:

{
  \"score\": number from -10 to 10,
  \"summary\": \"short summary\"
}
";
        assert_eq!(build_prompt(&evidence), expected);
    }

    #[test]
    fn test_build_prompt_with_no_evidence() {
        let prompt = build_prompt(&[]);
        assert!(prompt.contains("recent articles:\n\n\n\nOutput ONLY"));
        assert!(!prompt.contains("Title:"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let evidence = vec![EvidenceItem::new("T", "S", "L")];
        assert_eq!(build_prompt(&evidence), build_prompt(&evidence));
    }
}
