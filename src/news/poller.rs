//! Periodic feed refresh that replaces the shared market snapshot.

use super::feed::FeedSource;
use super::NewsItem;
use crate::analysis::{score_news, CurrencyImpact};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

/// Latest news batch and the impact map scored from it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketSnapshot {
    pub news: Vec<NewsItem>,
    pub impact: CurrencyImpact,
    pub updated_at: Option<DateTime<Utc>>,
    /// Message of the most recent failed refresh, cleared on success
    pub last_error: Option<String>,
    pub refresh_count: u64,
}

pub type SharedSnapshot = Arc<RwLock<MarketSnapshot>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(RwLock::new(MarketSnapshot::default()))
}

pub struct NewsPoller {
    source: Arc<dyn FeedSource>,
    snapshot: SharedSnapshot,
    interval: Duration,
}

impl NewsPoller {
    pub fn new(source: Arc<dyn FeedSource>, snapshot: SharedSnapshot, interval: Duration) -> Self {
        Self { source, snapshot, interval }
    }

    pub fn snapshot(&self) -> SharedSnapshot {
        self.snapshot.clone()
    }

    /// Fetch once and swap in the new state. On failure the previous news and
    /// impact are kept and only `last_error` changes.
    pub async fn refresh_once(&self) -> Result<usize> {
        counter!("feed_refresh_total", 1);
        match self.source.fetch().await {
            | Ok(news) => {
                let impact = score_news(&news);
                let count = news.len();
                gauge!("feed_items", count as f64);
                let mut guard = self.snapshot.write().await;
                guard.news = news;
                guard.impact = impact;
                guard.updated_at = Some(Utc::now());
                guard.last_error = None;
                guard.refresh_count += 1;
                log::info!(
                    "refreshed {}: {} items, {} currencies scored",
                    self.source.describe(),
                    count,
                    guard.impact.len()
                );
                Ok(count)
            }
            | Err(e) => {
                counter!("feed_refresh_errors_total", 1);
                log::warn!("refresh of {} failed: {}", self.source.describe(), e);
                self.snapshot.write().await.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Refresh immediately, then every `interval`, until the task is dropped.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            // errors are already logged and recorded in the snapshot
            let _ = self.refresh_once().await;
        }
    }
}
