//! Prompt context assembly and reply post-processing.

use crate::news::NewsItem;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Number of articles quoted to the model.
pub const CONTEXT_ARTICLES: usize = 5;
pub const MAX_FOLLOW_UPS: usize = 3;

const OPPORTUNITY_KEYWORDS: [&str; 3] = ["opportunit", "trading", "trade"];

static LIST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Quote the first articles for the model as numbered blocks.
pub fn format_news_context(news: &[NewsItem]) -> String {
    news.iter()
        .take(CONTEXT_ARTICLES)
        .enumerate()
        .map(|(i, item)| {
            format!(
                "Article {}:\nTitle: {}\nDate: {}\nDescription: {}",
                i + 1,
                item.title,
                item.pub_date,
                item.description
            )
            .trim()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One display unit of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyBlock {
    Bullet { text: String },
    Field { title: String, value: String },
    Paragraph { text: String },
}

impl fmt::Display for ReplyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | ReplyBlock::Bullet { text } => write!(f, "• {}", text),
            | ReplyBlock::Field { title, value } => write!(f, "{}: {}", title, value),
            | ReplyBlock::Paragraph { text } => f.write_str(text),
        }
    }
}

/// Split a completion into blocks, one per non-blank line. Lines starting
/// with `-` or `•` become bullets; lines with a colon become fields split at
/// the first colon.
pub fn format_response(content: &str) -> Vec<ReplyBlock> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
                ReplyBlock::Bullet { text: rest.trim().to_string() }
            } else if let Some((title, value)) = line.split_once(':') {
                ReplyBlock::Field { title: title.to_string(), value: value.trim().to_string() }
            } else {
                ReplyBlock::Paragraph { text: line.to_string() }
            }
        })
        .collect()
}

/// Whether the user is asking about trades, in which case the reply gets
/// the keyword-based suggestion attached.
pub fn is_opportunity_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    OPPORTUNITY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Non-blank lines with list numbering removed, at most three.
pub fn parse_follow_ups(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| LIST_NUMBER.replace(line.trim(), "").trim().to_string())
        .take(MAX_FOLLOW_UPS)
        .collect()
}
