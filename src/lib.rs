pub mod chat;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod similarity;

#[cfg(test)]
pub mod tests;

pub use config::AppConfig;
pub use errors::*;
