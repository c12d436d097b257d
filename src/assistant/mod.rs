//! News-aware chat assistant backed by a chat completion service.

pub mod cost;
pub mod format;
pub mod openai;

pub use cost::{estimate_cost, pricing_for, CostEstimate, ModelPricing};
pub use format::{format_news_context, format_response, is_opportunity_query, parse_follow_ups, ReplyBlock};
pub use openai::OpenAiClient;

use crate::analysis::{rank_opportunities, score_news, suggest, Suggestion};
use crate::config::AssistantConfig;
use crate::news::{NewsAnalysis, NewsItem};
use crate::utils::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const NEWS_ACCESS_NOTE: &str =
    "You have access to the latest forex market news. Give short, precise answers.";

pub const FALLBACK_REPLY: &str = "Sorry, I could not analyse this request.";

const FOLLOW_UP_SYSTEM: &str = "You are an assistant specialised in forex trading. \
Generate 3 relevant follow-up questions based on the previous conversation. \
The questions must be short, precise and trading-oriented.";
const FOLLOW_UP_TEMPERATURE: f32 = 0.7;
const FOLLOW_UP_MAX_TOKENS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// Body of a chat completion call; unset sampling options use the service
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Text of the first completion choice; empty if the service sent none.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// Answer to a chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub blocks: Vec<ReplyBlock>,
    /// Keyword-based suggestion, attached to trading questions only
    pub analysis: Option<Suggestion>,
    /// Missing when the model has no known pricing
    pub cost: Option<CostEstimate>,
    pub follow_ups: Vec<String>,
}

impl fmt::Display for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.blocks.iter().map(|b| b.to_string()).collect();
        f.write_str(&lines.join("\n"))?;
        if let Some(s) = &self.analysis {
            write!(f, "\n\nDeeper analysis:\n{}", s)?;
        }
        Ok(())
    }
}

pub struct Assistant {
    client: Arc<dyn ChatCompletion>,
    settings: AssistantConfig,
}

impl Assistant {
    pub fn new(client: Arc<dyn ChatCompletion>, settings: AssistantConfig) -> Self {
        Self { client, settings }
    }

    /// Assistant talking to the configured OpenAI-compatible endpoint.
    pub fn from_config(cfg: &AssistantConfig) -> Result<Self> {
        let client = OpenAiClient::from_config(cfg)?;
        Ok(Self::new(Arc::new(client), cfg.clone()))
    }

    pub fn settings(&self) -> &AssistantConfig {
        &self.settings
    }

    fn require_api_key(&self) -> Result<()> {
        if self.settings.api_key.trim().is_empty() {
            return Err(Error::ConfigError(
                "assistant API key not configured (set assistant.api_key or OPENAI_API_KEY)".to_string(),
            ));
        }
        Ok(())
    }

    /// Answer `message` using the first articles of `news` as context.
    pub async fn respond(&self, message: &str, news: &[NewsItem]) -> Result<ChatReply> {
        self.require_api_key()?;

        let messages = vec![
            ChatMessage::system(format!("{}\n\n{}", self.settings.context, NEWS_ACCESS_NOTE)),
            ChatMessage::user(format!("{}\n\nBased on this news:\n{}", message, format_news_context(news))),
        ];
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: messages.clone(),
            temperature: Some(self.settings.temperature),
            max_tokens: Some(self.settings.max_tokens),
        };

        let text = self.client.complete(request).await.map_err(|e| {
            log::error!("chat completion failed: {}", e);
            e
        })?;
        let text = if text.trim().is_empty() { FALLBACK_REPLY.to_string() } else { text };

        let analysis = if is_opportunity_query(message) {
            Some(suggest(&rank_opportunities(&score_news(news))))
        } else {
            None
        };

        let cost = match estimate_cost(&self.settings.model, &messages, text.chars().count()) {
            | Ok(c) => Some(c),
            | Err(e) => {
                log::warn!("no cost estimate: {}", e);
                None
            }
        };

        let follow_ups = self.follow_ups(message, &text).await;

        Ok(ChatReply { blocks: format_response(&text), analysis, cost, follow_ups })
    }

    /// Up to three follow-up questions; failures yield an empty list.
    pub async fn follow_ups(&self, message: &str, reply: &str) -> Vec<String> {
        let request = ChatRequest {
            model: self.settings.suggestion_model.clone(),
            messages: vec![
                ChatMessage::system(FOLLOW_UP_SYSTEM),
                ChatMessage::user(format!(
                    "User question: \"{}\"\nPrevious answer: \"{}\"\n\nGenerate 3 relevant follow-up questions.",
                    message, reply
                )),
            ],
            temperature: Some(FOLLOW_UP_TEMPERATURE),
            max_tokens: Some(FOLLOW_UP_MAX_TOKENS),
        };
        match self.client.complete(request).await {
            | Ok(text) => parse_follow_ups(&text),
            | Err(e) => {
                log::warn!("follow-up generation failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Run the configured analysis prompt over one article.
    pub async fn analyze_article(&self, item: &NewsItem) -> Result<NewsAnalysis> {
        self.require_api_key()?;
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(self.settings.context.clone()),
                ChatMessage::user(format!(
                    "{}\n\nArticle:\n{}\n{}",
                    self.settings.prompt, item.title, item.description
                )),
            ],
            temperature: None,
            max_tokens: None,
        };
        let text = self.client.complete(request).await?;
        Ok(NewsAnalysis::from_reply(&text))
    }
}

impl NewsAnalysis {
    /// Pick the labelled fields out of a free-form analysis. Text that fits
    /// no label ends up in `reasoning` when no reasoning field was given.
    pub fn from_reply(text: &str) -> Self {
        let mut out = NewsAnalysis::default();
        let mut unlabelled = Vec::new();
        let list = |v: &str| -> Vec<String> {
            v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
        };

        for block in format_response(text) {
            let (title, value) = match block {
                | ReplyBlock::Field { title, value } => (title.to_lowercase(), value),
                | other => {
                    unlabelled.push(other.to_string());
                    continue;
                }
            };
            if title.contains("sentiment") {
                out.sentiment = value;
            } else if title.contains("pair") {
                out.pairs = list(&value);
            } else if title.contains("currenc") {
                out.currencies = list(&value);
            } else if title.contains("opportunit") {
                out.opportunity = value;
            } else if title.contains("volatil") {
                out.volatility = value;
            } else if title.contains("time") {
                out.trading_time = value;
            } else if title.contains("reason") {
                out.reasoning = value;
            } else {
                unlabelled.push(format!("{}: {}", title, value));
            }
        }
        if out.reasoning.is_empty() {
            out.reasoning = unlabelled.join("\n");
        }
        out
    }
}
