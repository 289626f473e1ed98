//! Pure unit tests (no database or network required)
//!
//! These tests verify cross-module behavior without external dependencies.

use std::io::Write;

use crate::chat::ChatMessage;
use crate::chat::ChatState;
use crate::chat::Suggestion;
use crate::config::AppConfig;
use crate::errors::RagChatError;
use crate::models::ContentItem;
use crate::models::ContentTable;
use crate::rag::retriever::rank_by_similarity;
use crate::rag::ContextAssembler;

// ====== Configuration Tests ======

#[test]
fn test_default_config_values() {
    let config = AppConfig::default();
    assert_eq!(config.embedding_model(), "text-embedding-3-small");
    assert_eq!(config.embedding_dimension(), 1536);
    assert_eq!(config.llm_model(), "gpt-4.1");
    assert_eq!(config.search_limit(), 3);
    assert_eq!(config.suggestion_limit(), 2);
    assert_eq!(config.default_table(), "code_examples");
    assert_eq!(config.default_version(), "1.0.0");
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[database]
url = "postgresql://user:pw@localhost:5432/docs"
max_connections = 10
min_connections = 2
connection_timeout = 15

[logging]
level = "debug"
backtrace = false

[embeddings]
endpoint = "https://example.openai.azure.com"
api_key = "test-key"
model = "text-embedding-3-small"
dimension = 1536

[llm]
llm_endpoint = "https://example.openai.azure.com"
llm_key = "test-key"

[retrieval]
search_limit = 5
default_table = "airflow_code_embeddings"
"#
    )
    .unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(config.max_connections(), 10);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.embedding_provider(), "openai"); // serde default
    assert_eq!(config.llm_model(), "gpt-4.1"); // serde default
    assert_eq!(config.search_limit(), 5);
    assert_eq!(config.suggestion_limit(), 2); // serde default
    assert_eq!(config.default_table(), "airflow_code_embeddings");
    assert_eq!(config.history_path(), "ragchat_history.json"); // section default
}

#[test]
fn test_config_rejects_invalid_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[database\nurl = ").unwrap();

    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, RagChatError::TomlParsing(_)));
}

// ====== Error Handling Tests ======

#[test]
fn test_error_display() {
    let err = RagChatError::UnknownTable("bogus".to_string());
    assert_eq!(err.to_string(), "Unknown content table: bogus");

    let err = RagChatError::ItemNotFound(42);
    assert_eq!(err.to_string(), "Content item not found: id 42");

    let err = RagChatError::Embedding("no embedding in response".to_string());
    assert!(err.to_string().starts_with("Embedding error:"));
}

// ====== Retrieval Pipeline Tests ======

fn item(id: i64, content: &str, embedding: Option<Vec<f32>>) -> ContentItem {
    ContentItem {
        id,
        version: Some("2.10.5".to_string()),
        release_date: None,
        runtime_versions: None,
        name: Some(format!("example-{id}")),
        file_path: None,
        content: Some(content.to_string()),
        embedding,
        created_at: None,
    }
}

#[test]
fn test_rank_then_assemble_context() {
    let query_embedding = vec![1.0, 0.0];
    let items = vec![
        item(1, "weak match", Some(vec![0.1, 0.9])),
        item(2, "strong match", Some(vec![0.9, 0.1])),
        item(3, "broken row", None),
    ];

    let mut ranked = rank_by_similarity(&query_embedding, items);
    ranked.truncate(2);

    assert_eq!(ranked[0].item.id, 2);
    assert_eq!(ranked[1].item.id, 1);

    let context = ContextAssembler.assemble("scheduling question", &ranked);
    assert!(context.contains("example-2"));
    assert!(context.contains("strong match"));
    assert!(!context.contains("broken row"));
}

#[test]
fn test_suggestions_from_ranked_results() {
    let query_embedding = vec![1.0, 0.0];
    let ranked = rank_by_similarity(
        &query_embedding,
        vec![item(5, "only hit", Some(vec![1.0, 0.0]))],
    );

    let suggestions: Vec<Suggestion> = ranked
        .iter()
        .map(|r| Suggestion {
            id: r.item.id,
            name: r.item.display_name(),
            score: r.score,
        })
        .collect();

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id, 5);
    let score = suggestions[0].score.unwrap();
    assert!((score - 1.0).abs() < 1e-6);
}

// ====== Chat State Tests ======

#[test]
fn test_chat_state_json_roundtrip() {
    let mut state = ChatState::new("2.9.3".to_string(), ContentTable::AirflowEmbeddings);
    state.push(ChatMessage::user("how do sensors work?".to_string()));
    state.push(ChatMessage::assistant(
        "they poll".to_string(),
        vec![Suggestion {
            id: 9,
            name: "sensor docs".to_string(),
            score: Some(0.91),
        }],
    ));

    let json = serde_json::to_string(&state).unwrap();
    let restored: ChatState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.messages.len(), 2);
    assert_eq!(restored.selected_table, ContentTable::AirflowEmbeddings);
    assert_eq!(restored.messages[1].suggestions[0].id, 9);
    // Roles serialize as lowercase wire strings
    assert!(json.contains("\"user\""));
    assert!(json.contains("\"assistant\""));
}

#[test]
fn test_user_message_suggestions_omitted_from_json() {
    let message = ChatMessage::user("hi".to_string());
    let json = serde_json::to_string(&message).unwrap();
    assert!(!json.contains("suggestions"));
}
