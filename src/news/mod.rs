//! News items, RSS ingestion and the periodic refresh loop.

pub mod feed;
pub mod poller;
pub mod rss;
pub mod text;

pub use feed::{FeedSource, FileFeed, RssFeed};
pub use poller::{shared_snapshot, MarketSnapshot, NewsPoller, SharedSnapshot};
pub use rss::parse_rss;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single headline from the news feed, already reduced to plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    /// Publication date as found in the feed
    pub pub_date: String,
    /// `pub_date` parsed as RFC 2822, when it parses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub creator: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<NewsAnalysis>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), ..Default::default() }
    }
}

/// Assistant-produced breakdown attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsAnalysis {
    pub sentiment: String,
    pub currencies: Vec<String>,
    pub pairs: Vec<String>,
    pub opportunity: String,
    pub volatility: String,
    pub trading_time: String,
    pub reasoning: String,
}
