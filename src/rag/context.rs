//! Context assembly from retrieved items
//!
//! The context block always opens with a short restatement of the query, then
//! reports what retrieval produced: the top suggestions when search worked,
//! or a note describing which stage degraded. A failed retrieval never aborts
//! the turn; the completion request still goes out with the degraded context.

use crate::cli::output::truncate_str;
use crate::rag::SearchResult;

const QUERY_PREVIEW_CHARS: usize = 30;
const ITEM_PREVIEW_CHARS: usize = 80;

/// Assembler for the context block folded into the prompt
#[derive(Debug, Clone, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    /// Context when retrieval produced ranked suggestions
    pub fn assemble(&self, query: &str, suggestions: &[SearchResult]) -> String {
        if suggestions.is_empty() {
            return format!(
                "{}I couldn't find specific items in our database.",
                self.lead_in(query)
            );
        }

        let mut context = format!(
            "{}I found potentially relevant items (top {} shown as suggestions):\n",
            self.lead_in(query),
            suggestions.len()
        );

        for result in suggestions {
            let name = result.item.display_name();
            let similarity = result
                .score
                .map(|s| format!(" (Similarity: {:.1}%)", s * 100.0))
                .unwrap_or_default();
            let preview = result
                .item
                .content
                .as_deref()
                .map_or_else(|| "No description.".to_string(), |c| {
                    truncate_str(c, ITEM_PREVIEW_CHARS)
                });

            context.push_str(&format!("- {name}{similarity}: {preview}\n"));
        }

        context
    }

    /// Context when the nearest-neighbor query or result processing failed
    pub fn assemble_search_error(&self, query: &str) -> String {
        format!("{}Error searching database.", self.lead_in(query))
    }

    /// Context when the query embedding could not be generated
    pub fn assemble_embedding_failed(&self, query: &str) -> String {
        format!(
            "{}Could not process query for database search (embedding generation failed).",
            self.lead_in(query)
        )
    }

    fn lead_in(&self, query: &str) -> String {
        let preview: String = query.chars().take(QUERY_PREVIEW_CHARS).collect();
        let ellipsis = if query.chars().count() > QUERY_PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        format!("Regarding your query about \"{preview}{ellipsis}\", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentItem;

    fn result(name: &str, content: Option<&str>, score: Option<f32>) -> SearchResult {
        SearchResult {
            item: ContentItem {
                id: 1,
                version: None,
                release_date: None,
                runtime_versions: None,
                name: Some(name.to_string()),
                file_path: None,
                content: content.map(ToString::to_string),
                embedding: None,
                created_at: None,
            },
            score,
        }
    }

    #[test]
    fn test_assemble_with_suggestions() {
        let assembler = ContextAssembler;
        let results = vec![
            result("TaskFlow API", Some("Decorator-based DAG authoring"), Some(0.875)),
            result("Sensors", None, None),
        ];

        let context = assembler.assemble("how do sensors work", &results);
        assert!(context.starts_with("Regarding your query about \"how do sensors work\", "));
        assert!(context.contains("top 2 shown as suggestions"));
        assert!(context.contains("- TaskFlow API (Similarity: 87.5%): Decorator-based DAG authoring"));
        assert!(context.contains("- Sensors: No description."));
    }

    #[test]
    fn test_assemble_empty_results() {
        let context = ContextAssembler.assemble("anything", &[]);
        assert!(context.ends_with("I couldn't find specific items in our database."));
    }

    #[test]
    fn test_long_query_is_previewed() {
        let query = "a".repeat(45);
        let context = ContextAssembler.assemble(&query, &[]);
        let expected_preview = "a".repeat(30);
        assert!(context.contains(&format!("\"{expected_preview}...\"")));
    }

    #[test]
    fn test_degraded_contexts() {
        let assembler = ContextAssembler;
        assert!(assembler
            .assemble_search_error("q")
            .ends_with("Error searching database."));
        assert!(assembler
            .assemble_embedding_failed("q")
            .ends_with("(embedding generation failed)."));
    }

    #[test]
    fn test_long_content_is_truncated() {
        let long_content = "x".repeat(200);
        let context =
            ContextAssembler.assemble("q", &[result("big", Some(&long_content), Some(0.5))]);
        assert!(context.contains(&format!("{}...", "x".repeat(80))));
        assert!(!context.contains(&"x".repeat(120)));
    }
}
