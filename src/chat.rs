//! Chat-completion client.
//!
//! One POST to an OpenAI-style `/v1/chat/completions` endpoint per pipeline
//! run. Sampling temperature is pinned to 0.0 in [`build_request`] rather
//! than read from configuration: extraction must be reproducible, and no
//! schema or preamble gets to change that.
//!
//! The client returns the raw reply text unparsed; turning it into a typed
//! record is the schema's job, invoked by the orchestration layer.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pinned sampling temperature for every compiled request.
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub(crate) model: String,
    pub(crate) temperature: f32,
    pub(crate) messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub(crate) role: &'static str,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Assemble the two-message request: system = preamble, user = compiled
/// three-slot message. Temperature is always 0.0.
pub(crate) fn build_request(model: &str, preamble: &str, user_message: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        temperature: TEMPERATURE,
        messages: vec![
            ChatMessage {
                role: "system",
                content: preamble.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_message.to_string(),
            },
        ],
    }
}

/// Client for the chat-completion service.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.chat_base_url.clone(),
            api_key: config.chat_api_key.clone(),
            model: config.chat_model.clone(),
        }
    }

    /// Send one completion request and return the raw reply text.
    pub async fn complete(
        &self,
        preamble: &str,
        user_message: &str,
    ) -> Result<String, ExtractError> {
        let request = build_request(&self.model, preamble, user_message);

        debug!(
            model = %self.model,
            user_len = user_message.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Chat {
                detail: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(ExtractError::Chat {
                detail: format!("service returned {status}: {body}"),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| ExtractError::Chat {
            detail: format!("failed to parse service response: {e}"),
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ExtractError::Chat {
                detail: "no choices in chat response".to_string(),
            })?;

        debug!(reply_len = content.len(), reply = %content, "received chat reply");
        Ok(content)
    }
}
