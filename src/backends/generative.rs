//! Remote generative backend over an OpenAI-compatible chat completions API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::types::{Answer, Service};

use super::prompt::PromptBuilder;
use super::AnswerBackend;

/// Hard character budget for the context embedded in the prompt
pub const MAX_CONTEXT_CHARS: usize = 15_000;

/// Remote completion backend
///
/// Constructed only when a credential is provisioned at startup; each call
/// is a single attempt with a request-scoped timeout, no retry.
pub struct GenerativeBackend {
    client: Client,
    config: RemoteConfig,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl GenerativeBackend {
    /// Create the backend from config; `None` when no credential is set
    pub fn from_config(config: &RemoteConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Some(Self {
            client,
            config: config.clone(),
            api_key,
        }))
    }

    /// First `MAX_CONTEXT_CHARS` characters of the context
    fn truncate_context(context: &str) -> &str {
        match context.char_indices().nth(MAX_CONTEXT_CHARS) {
            Some((byte_idx, _)) => &context[..byte_idx],
            None => context,
        }
    }
}

#[async_trait]
impl AnswerBackend for GenerativeBackend {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        let prompt = PromptBuilder::build_qa_prompt(question, Self::truncate_context(context));

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: PromptBuilder::system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::BackendFailure(format!("completion request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::BackendFailure(format!(
                "completion failed: HTTP {status} - {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::BackendFailure(format!("failed to parse completion response: {e}")))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::BackendFailure("empty completion response".to_string()))?;

        Ok(Answer {
            answer: answer.trim().to_string(),
            // the remote service exposes no confidence signal
            confidence: 1.0,
            model: self.config.model.clone(),
            service: Service::Remote,
        })
    }

    fn name(&self) -> &str {
        "remote"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
