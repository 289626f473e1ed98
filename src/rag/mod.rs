//! RAG (Retrieval-Augmented Generation) over the content tables
//!
//! One user turn runs a single sequential chain: embed the query, fetch
//! nearest neighbors from Postgres, re-rank locally by cosine similarity,
//! fold the top items into the prompt, and request a completion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ragchat::chat::ChatState;
//! use ragchat::config::AppConfig;
//! use ragchat::models::ContentTable;
//! use ragchat::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::new(&config).await?;
//!
//!     let state = ChatState::new("2.10.5".to_string(), ContentTable::CodeExamples);
//!     let response = service.chat_turn(&state, "How do I define a DAG?").await?;
//!     println!("Answer: {}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod retriever;

pub use context::ContextAssembler;
pub use pipeline::RagResponse;
pub use pipeline::RagService;
pub use retriever::Retriever;

use crate::models::ContentItem;

/// Retrieved item with its local cosine re-rank score.
///
/// The score is None when the item carries no usable embedding (missing,
/// malformed, or of a different dimension than the query vector).
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub item: ContentItem,
    pub score: Option<f32>,
}
