//! # fxpulse
//! Forex news dashboard: keyword impact scoring of RSS headlines, currency
//! pair opportunity ranking, trading session clock and a news-aware chat
//! assistant.

pub use crate::utils::error::{Error, Result};

pub mod analysis;
pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod news;
pub mod sessions;
pub mod utils;

pub use analysis::{analyze, MarketAnalysis};
pub use config::Config;
pub use news::NewsItem;
