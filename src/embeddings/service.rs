//! Embedding service wired from configuration

use tracing::warn;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::embeddings::EmbeddingProvider;
use crate::errors::Result;

/// Embedding client plus the configured model dimension
pub struct EmbeddingService {
    client: EmbeddingClient,
    dimension: usize,
}

impl EmbeddingService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let provider = EmbeddingProvider::parse(config.embedding_provider())?;
        let client = EmbeddingClient::new(
            provider,
            config.embedding_model().to_string(),
            config.embedding_endpoint().to_string(),
            config.embedding_api_key().map(ToString::to_string),
        )?;

        Ok(Self {
            client,
            dimension: config.embedding_dimension(),
        })
    }

    /// Generate an embedding for the given text.
    ///
    /// A dimension mismatch against the configured value is logged but not
    /// fatal; the stored vectors decide what is actually comparable.
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.client.generate(text).await?;

        if embedding.len() != self.dimension {
            warn!(
                "Embedding dimension {} differs from configured {}",
                embedding.len(),
                self.dimension
            );
        }

        Ok(embedding)
    }

    /// Configured embedding dimension
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
}
