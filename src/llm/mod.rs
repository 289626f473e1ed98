//! Chat-completion client and prompt construction

pub mod client;
pub mod prompts;

pub use client::ApiMessage;
pub use client::LlmClient;

use serde::Deserialize;
use serde::Serialize;

/// Sender role on a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}
