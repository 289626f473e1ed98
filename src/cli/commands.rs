//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

use crate::models::ContentTable;

#[derive(Parser)]
#[command(name = "ragchat")]
#[command(about = "Chat with an AI assistant over a vector-indexed Postgres content table")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (transcript persists across runs)
    Chat {
        /// Override the version filter for this session
        #[arg(long)]
        version: Option<String>,
        /// Override the content table for this session
        #[arg(long, value_enum)]
        table: Option<ContentTable>,
    },
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: String,
        /// Override the version filter
        #[arg(long)]
        version: Option<String>,
        /// Override the content table
        #[arg(long, value_enum)]
        table: Option<ContentTable>,
    },
    /// List summarized content items
    List {
        /// Content table to list from
        #[arg(long, value_enum)]
        table: Option<ContentTable>,
        /// Maximum number of records to return
        #[arg(short, long, default_value = "100")]
        limit: u32,
    },
    /// Show a single content item in full
    Show {
        /// Item id
        id: i64,
        /// Content table to read from
        #[arg(long, value_enum)]
        table: Option<ContentTable>,
    },
    /// Run a semantic search without LLM generation
    Search {
        /// Free-text query
        query: String,
        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: u32,
        /// Filter results to a version tag
        #[arg(long)]
        version: Option<String>,
        /// Ignore any persisted version filter
        #[arg(long)]
        any_version: bool,
        /// Content table to search
        #[arg(long, value_enum)]
        table: Option<ContentTable>,
    },
    /// List distinct version tags (autocomplete data)
    Versions {
        /// Only versions starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,
        /// Content table to read from
        #[arg(long, value_enum)]
        table: Option<ContentTable>,
    },
    /// Show current configuration
    Config,
    /// Clear the persisted chat history
    Reset,
}
