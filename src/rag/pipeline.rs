//! Complete RAG pipeline: Embed -> Retrieve -> Rerank -> Generate

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::chat::ChatState;
use crate::chat::Suggestion;
use crate::config::AppConfig;
use crate::database::Database;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::llm::prompts;
use crate::llm::LlmClient;
use crate::rag::ContextAssembler;
use crate::rag::Retriever;
use crate::rag::SearchResult;

/// Complete RAG service
pub struct RagService {
    retriever: Retriever,
    embedding_service: Arc<EmbeddingService>,
    context_assembler: ContextAssembler,
    llm_client: LlmClient,
    search_limit: usize,
    suggestion_limit: usize,
}

impl RagService {
    /// Create a new RAG service from configuration
    ///
    /// # Errors
    /// - Database connection errors
    /// - Embedding or LLM client configuration errors
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let database = Arc::new(Database::from_config(config).await?);
        let embedding_service = Arc::new(EmbeddingService::new(config)?);
        let llm_client = LlmClient::new(config)?;
        Ok(Self::from_services(
            database,
            embedding_service,
            llm_client,
            config,
        ))
    }

    /// Create from existing services
    pub fn from_services(
        database: Arc<Database>,
        embedding_service: Arc<EmbeddingService>,
        llm_client: LlmClient,
        config: &AppConfig,
    ) -> Self {
        let retriever = Retriever::new(database, embedding_service.clone());

        Self {
            retriever,
            embedding_service,
            context_assembler: ContextAssembler,
            llm_client,
            search_limit: config.search_limit(),
            suggestion_limit: config.suggestion_limit(),
        }
    }

    /// Run one chat turn: retrieval feeds the prompt, the prior transcript is
    /// replayed, and the completion comes back with the top suggestions.
    ///
    /// Retrieval degrades rather than fails: an embedding or search error is
    /// folded into the context as a note and the completion request still
    /// goes out. Only a completion failure surfaces as an error.
    pub async fn chat_turn(&self, state: &ChatState, query: &str) -> Result<RagResponse> {
        info!("Processing chat turn: {}", query);

        let (context, suggestions) = self.retrieve_context(state, query).await;

        debug!("Requesting completion with {} prior messages", state.messages.len());
        let messages = prompts::build_messages(&state.messages, query, &context);
        let answer = self.llm_client.complete(&messages).await?;

        info!("Chat turn completed");

        Ok(RagResponse {
            answer,
            suggestions,
            context,
        })
    }

    /// Retrieval half of the turn; never fails, only degrades
    async fn retrieve_context(&self, state: &ChatState, query: &str) -> (String, Vec<Suggestion>) {
        let query_embedding = match self.embedding_service.generate(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Embedding generation failed: {e}");
                return (
                    self.context_assembler.assemble_embedding_failed(query),
                    Vec::new(),
                );
            }
        };

        let results = match self
            .retriever
            .search_with_embedding(
                state.selected_table,
                &query_embedding,
                self.search_limit,
                state.active_version(),
            )
            .await
        {
            Ok(mut results) => {
                results.truncate(self.suggestion_limit);
                results
            }
            Err(e) => {
                warn!("Semantic search failed: {e}");
                return (
                    self.context_assembler.assemble_search_error(query),
                    Vec::new(),
                );
            }
        };

        let context = self.context_assembler.assemble(query, &results);
        let suggestions = results
            .iter()
            .map(|r| Suggestion {
                id: r.item.id,
                name: r.item.display_name(),
                score: r.score,
            })
            .collect();

        (context, suggestions)
    }

    /// Retrieval only, without LLM generation
    pub async fn search(
        &self,
        state: &ChatState,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        self.retriever
            .semantic_search(state.selected_table, query, limit, state.active_version())
            .await
    }

    /// Get retriever reference
    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }
}

/// Result of one RAG-augmented chat turn
#[derive(Debug, Clone)]
pub struct RagResponse {
    pub answer: String,
    pub suggestions: Vec<Suggestion>,
    pub context: String,
}
