//! Embedding generation for free-text queries

pub mod client;
pub mod service;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use service::EmbeddingService;
