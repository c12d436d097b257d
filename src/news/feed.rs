//! News feed sources.

use super::rss::parse_rss;
use super::NewsItem;
use crate::config::FeedConfig;
use crate::utils::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can produce the current list of headlines, newest first.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<NewsItem>>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

/// RSS feed fetched over HTTP, optionally through a pass-through proxy that
/// takes the target URL as an encoded suffix.
#[derive(Clone)]
pub struct RssFeed {
    url: String,
    proxy: Option<String>,
    client: reqwest::Client,
}

impl RssFeed {
    pub fn new(url: impl Into<String>, proxy: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fxpulse/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { url: url.into(), proxy: proxy.filter(|p| !p.trim().is_empty()), client })
    }

    pub fn from_config(cfg: &FeedConfig) -> Result<Self> {
        Self::new(cfg.url.clone(), cfg.proxy.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    /// URL actually requested, after applying the proxy prefix.
    pub fn request_url(&self) -> String {
        match &self.proxy {
            | Some(prefix) => {
                let encoded: String = url::form_urlencoded::byte_serialize(self.url.as_bytes()).collect();
                format!("{}{}", prefix, encoded)
            }
            | None => self.url.clone(),
        }
    }
}

#[async_trait]
impl FeedSource for RssFeed {
    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let url = self.request_url();
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("GET {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::ConnectionError(format!("GET {} returned http {}", url, status)));
        }
        let body = resp.text().await?;
        parse_rss(&body)
    }

    fn describe(&self) -> String {
        format!("rss:{}", self.url)
    }
}

/// RSS document read from disk; used for offline analysis and tests.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let xml = tokio::fs::read_to_string(&self.path).await?;
        parse_rss(&xml)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
