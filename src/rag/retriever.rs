//! Semantic retrieval and local re-ranking

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::database::Database;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::models::ContentItem;
use crate::models::ContentTable;
use crate::rag::SearchResult;
use crate::similarity::cosine_similarity;

/// Retriever for semantic search over a content table
pub struct Retriever {
    database: Arc<Database>,
    embedding_service: Arc<EmbeddingService>,
}

impl Retriever {
    pub fn new(database: Arc<Database>, embedding_service: Arc<EmbeddingService>) -> Self {
        Self {
            database,
            embedding_service,
        }
    }

    /// Embed the query, run the nearest-neighbor search, and re-rank the
    /// returned rows by cosine similarity against the query vector.
    pub async fn semantic_search(
        &self,
        table: ContentTable,
        query: &str,
        limit: usize,
        version: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        debug!("Performing semantic search: {}", query);

        let query_embedding = self.embedding_service.generate(query).await?;
        self.search_with_embedding(table, &query_embedding, limit, version)
            .await
    }

    /// Search with an already-generated query embedding
    pub async fn search_with_embedding(
        &self,
        table: ContentTable,
        query_embedding: &[f32],
        limit: usize,
        version: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let items = self
            .database
            .semantic_search(table, query_embedding, limit as i64, version)
            .await?;

        Ok(rank_by_similarity(query_embedding, items))
    }
}

/// Score each item against the query embedding and sort descending.
///
/// The database already orders by its distance operator; this re-ranks with
/// an exact cosine score computed locally. Unscorable items sort last, as if
/// they scored below every real similarity.
pub fn rank_by_similarity(query_embedding: &[f32], items: Vec<ContentItem>) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = items
        .into_iter()
        .map(|item| {
            let score = item
                .embedding
                .as_deref()
                .and_then(|stored| cosine_similarity(query_embedding, stored))
                .filter(|s| !s.is_nan());
            SearchResult { item, score }
        })
        .collect();

    results.sort_by(|a, b| {
        let sa = a.score.unwrap_or(-1.0);
        let sb = b.score.unwrap_or(-1.0);
        sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
    });

    results
}
