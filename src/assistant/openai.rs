//! OpenAI-compatible chat completion client.

use super::{ChatCompletion, ChatRequest};
use crate::config::AssistantConfig;
use crate::utils::error::{Error, Result};
use async_trait::async_trait;
use metrics::histogram;
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url: base_url.into(), api_key: api_key.into(), client })
    }

    pub fn from_config(cfg: &AssistantConfig) -> Result<Self> {
        Self::new(cfg.base_url.clone(), cfg.api_key.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    /// Returns the first choice's content, or an empty string when the
    /// service sent none.
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let url = self.endpoint();
        let start = Instant::now();
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await;
        histogram!("assistant_request_ms", start.elapsed().as_millis() as f64);

        let resp = resp.map_err(|e| Error::ConnectionError(format!("POST {} failed: {}", url, e)))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::AssistantError(format!("chat completion http {}: {}", status, body)));
        }

        let parsed: CompletionResponse = resp.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        log::debug!("completion from {} ({} chars)", request.model, content.len());
        Ok(content)
    }
}
