//! OpenAI-compatible chat-completions client

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::RagChatError;
use crate::errors::Result;

/// Role-tagged message in the wire format the completions API expects
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub role: &'static str,
    pub content: String,
}

/// Returned when the API answers without a usable choice
const EMPTY_COMPLETION_FALLBACK: &str =
    "Sorry, I could not generate a valid response at this time.";

/// Client for chat-completion requests
pub struct LlmClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl LlmClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| RagChatError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: config.llm_endpoint().to_string(),
            api_key: config.llm_key().to_string(),
            model: config.llm_model().to_string(),
            client,
        })
    }

    /// Request a completion for an ordered list of role-tagged messages.
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Non-success API responses (rate limits, invalid model)
    pub async fn complete(&self, messages: &[ApiMessage]) -> Result<String> {
        #[derive(Serialize)]
        struct CompletionRequest<'a> {
            model: &'a str,
            messages: &'a [ApiMessage],
        }

        #[derive(Deserialize)]
        struct CompletionResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {} messages", messages.len());

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RagChatError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagChatError::Completion(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| RagChatError::Completion(format!("Failed to parse response: {e}")))?;

        let answer = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string());

        Ok(answer)
    }
}
