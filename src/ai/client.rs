//! Thin chat-completions client for the hosted report-generation model.
//!
//! One fire-once request per call: no retry, no backoff, no caching.
//! Failures bubble up to the caller as a tagged error.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.ai_api_base, &config.ai_api_key, &config.ai_model)
    }

    /// Sends one completion request and returns the assistant's text.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        if self.api_key.is_empty() {
            bail!("AI_API_KEY is not configured");
        }

        let body = ChatRequest {
            model: self.model.clone(),
            messages,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("chat completion returned {status}: {detail}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("malformed chat completion response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("chat completion contained no content"))
    }
}
