//! Chat transcript and persisted preferences
//!
//! The transcript plus a few UI preferences (selected version, selected
//! table, version-filter toggle) live in one JSON state file, written after
//! every change from a single flow. Messages are never mutated once created.

pub mod history;

pub use history::ChatStore;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::llm::ChatRole;
use crate::models::ContentTable;

/// Content item suggested alongside an assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    /// Local cosine re-rank score; None when the item's vector was unusable
    pub score: Option<f32>,
}

/// One chat message in the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl ChatMessage {
    pub fn user(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            text,
            suggestions: Vec::new(),
        }
    }

    pub fn assistant(text: String, suggestions: Vec<Suggestion>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            text,
            suggestions,
        }
    }
}

/// Persisted chat state: transcript plus UI preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub selected_version: String,
    pub selected_table: ContentTable,
    /// Whether the version equality filter is applied to semantic search
    pub version_filter: bool,
}

impl ChatState {
    pub fn new(selected_version: String, selected_table: ContentTable) -> Self {
        Self {
            messages: Vec::new(),
            selected_version,
            selected_table,
            version_filter: true,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Version filter to pass to search, honoring the toggle
    pub fn active_version(&self) -> Option<&str> {
        if self.version_filter && !self.selected_version.trim().is_empty() {
            Some(self.selected_version.as_str())
        } else {
            None
        }
    }

    pub fn reset_messages(&mut self) {
        self.messages.clear();
    }
}

/// Prefix filter over known version strings, for autocomplete
pub fn filter_versions<'a>(versions: &'a [String], prefix: &str) -> Vec<&'a str> {
    versions
        .iter()
        .filter(|v| v.starts_with(prefix))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_version_respects_toggle() {
        let mut state = ChatState::new("2.10.5".to_string(), ContentTable::CodeExamples);
        assert_eq!(state.active_version(), Some("2.10.5"));

        state.version_filter = false;
        assert_eq!(state.active_version(), None);

        state.version_filter = true;
        state.selected_version = "   ".to_string();
        assert_eq!(state.active_version(), None);
    }

    #[test]
    fn test_filter_versions_prefix() {
        let versions: Vec<String> = ["2.10.5", "2.10.0", "2.9.3", "1.10.15"]
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(filter_versions(&versions, "2.10"), vec!["2.10.5", "2.10.0"]);
        assert_eq!(filter_versions(&versions, "1"), vec!["1.10.15"]);
        assert!(filter_versions(&versions, "3").is_empty());
        assert_eq!(filter_versions(&versions, "").len(), 4);
    }

    #[test]
    fn test_message_constructors() {
        let user = ChatMessage::user("hi".to_string());
        assert_eq!(user.role, crate::llm::ChatRole::User);
        assert!(user.suggestions.is_empty());

        let assistant = ChatMessage::assistant(
            "hello".to_string(),
            vec![Suggestion {
                id: 1,
                name: "item".to_string(),
                score: Some(0.9),
            }],
        );
        assert_eq!(assistant.role, crate::llm::ChatRole::Assistant);
        assert_eq!(assistant.suggestions.len(), 1);
        assert_ne!(user.id, assistant.id);
    }
}
