//! Health recommendation generation
//!
//! Turns a fetched [`AirQualitySnapshot`] plus the user's context into
//! natural-language advice by sending one chat-completion request to a
//! hosted model. The generated text is returned verbatim.

pub mod prompt;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::AirSenseConfig;
use crate::models::{AirQualitySnapshot, LocationQuery, Recommendation, UserContext};
use crate::{AirSenseError, Result};

/// Produces a recommendation from fetched metrics and user context
#[async_trait::async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Generate advice text. One outbound call, no retries, no streaming.
    async fn generate(
        &self,
        location: &LocationQuery,
        snapshot: &AirQualitySnapshot,
        context: &UserContext,
    ) -> Result<Recommendation>;
}

/// Chat-completion client for the Groq-hosted OpenAI-compatible API
pub struct GroqCompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqCompletionClient {
    /// Create a new client. Fails when no completion API key is configured.
    pub fn new(config: &AirSenseConfig) -> Result<Self> {
        let api_key = config
            .completion
            .api_key
            .clone()
            .ok_or_else(|| AirSenseError::config("Completion API key is not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.completion.timeout_seconds.into()))
            .user_agent("AirSense/0.1.0")
            .build()
            .map_err(|e| AirSenseError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.completion.base_url.clone(),
            model: config.completion.model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl RecommendationGenerator for GroqCompletionClient {
    async fn generate(
        &self,
        location: &LocationQuery,
        snapshot: &AirQualitySnapshot,
        context: &UserContext,
    ) -> Result<Recommendation> {
        let prompt = prompt::build_prompt(location, snapshot, context);
        debug!("Completion prompt is {} characters", prompt.len());

        let request = wire::ChatRequest {
            model: self.model.clone(),
            messages: vec![wire::ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let url = format!("{}/chat/completions", self.base_url);
        info!(
            "Requesting health recommendation for {} from model {}",
            location.display_name(),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Completion request failed: {}", e);
                AirSenseError::generation(format!("Completion request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return match status.as_u16() {
                401 => Err(AirSenseError::generation(
                    "Invalid or missing completion API key",
                )),
                _ => Err(AirSenseError::generation(format!(
                    "Completion provider error {status}: {error_text}"
                ))),
            };
        }

        let completion: wire::ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            AirSenseError::generation("Invalid response received from completion provider")
        })?;

        let text = wire::into_text(completion)?;
        Ok(Recommendation::new(text))
    }
}

/// Chat-completion API request and response structures
mod wire {
    use super::{AirSenseError, Result};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct ChatRequest {
        pub model: String,
        pub messages: Vec<ChatMessage>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatMessage {
        pub role: String,
        pub content: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ChatResponse {
        pub choices: Vec<ChatChoice>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ChatChoice {
        pub message: ChatMessage,
    }

    /// Pull the first choice's content out of the completion response.
    /// Empty choices and blank text both count as generation failures.
    pub fn into_text(response: ChatResponse) -> Result<String> {
        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AirSenseError::generation("Completion returned no choices"))?;

        if text.trim().is_empty() {
            return Err(AirSenseError::generation("Completion returned empty text"));
        }

        Ok(text)
    }
}
