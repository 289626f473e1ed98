//! Prompt construction for RAG-augmented chat turns

use crate::chat::ChatMessage;
use crate::llm::ApiMessage;
use crate::llm::ChatRole;

/// System preamble sent as the first message of every completion request
pub const SYSTEM_PREAMBLE: &str = "You are a helpful assistant. Use the provided context from \
    the knowledge base to answer the user's query. Prefer the context over general knowledge \
    when they disagree, and say so when the context does not cover the question.";

/// Fold the retrieved context block and the user query into the final user
/// message of the request.
pub fn build_user_turn(context: &str, query: &str) -> String {
    format!("Context from knowledge base:\n---\n{context}\n---\n\nUser Query: {query}")
}

/// Assemble the ordered message list for one chat turn: system preamble,
/// prior transcript, then the context-augmented query.
pub fn build_messages(history: &[ChatMessage], query: &str, context: &str) -> Vec<ApiMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);

    messages.push(ApiMessage {
        role: ChatRole::System.as_str(),
        content: SYSTEM_PREAMBLE.to_string(),
    });

    for msg in history {
        messages.push(ApiMessage {
            role: msg.role.as_str(),
            content: msg.text.clone(),
        });
    }

    messages.push(ApiMessage {
        role: ChatRole::User.as_str(),
        content: build_user_turn(context, query),
    });

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatMessage;

    #[test]
    fn test_build_user_turn_contains_context_and_query() {
        let turn = build_user_turn("ctx body", "what is a DAG?");
        assert!(turn.starts_with("Context from knowledge base:"));
        assert!(turn.contains("ctx body"));
        assert!(turn.ends_with("User Query: what is a DAG?"));
    }

    #[test]
    fn test_build_messages_ordering() {
        let history = vec![
            ChatMessage::user("first question".to_string()),
            ChatMessage::assistant("first answer".to_string(), Vec::new()),
        ];

        let messages = build_messages(&history, "second question", "some context");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "first question");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].role, "user");
        assert!(messages[3].content.contains("second question"));
        assert!(messages[3].content.contains("some context"));
    }

    #[test]
    fn test_build_messages_empty_history() {
        let messages = build_messages(&[], "q", "c");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }
}
