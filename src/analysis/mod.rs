//! News-driven currency analysis: keyword scoring, pair ranking, suggestions.

pub mod conditions;
pub mod impact;
pub mod opportunity;
pub mod strength;
pub mod suggestion;

pub use conditions::{validate_conditions, MarketCondition, MARKET_CONDITIONS};
pub use impact::{score_news, score_news_with, CurrencyImpact, Impact, NEWS_WINDOW};
pub use opportunity::{rank_opportunities, Opportunity};
pub use strength::{sorted_strengths, strength_board, CurrencyStrength, StrengthBoard};
pub use suggestion::{suggest, ConfidenceLevel, Direction, Suggestion};

use crate::news::NewsItem;
use serde::Serialize;

/// Everything the dashboard and the assistant derive from one news batch.
#[derive(Debug, Clone, Serialize)]
pub struct MarketAnalysis {
    pub impact: CurrencyImpact,
    pub board: StrengthBoard,
    pub opportunities: Vec<Opportunity>,
    pub suggestion: Suggestion,
}

impl MarketAnalysis {
    pub fn from_impact(impact: CurrencyImpact) -> Self {
        let board = strength_board(&impact);
        let opportunities = rank_opportunities(&impact);
        let suggestion = suggest(&opportunities);
        Self { impact, board, opportunities, suggestion }
    }
}

/// Run the full pipeline over a news batch.
pub fn analyze(news: &[NewsItem]) -> MarketAnalysis {
    MarketAnalysis::from_impact(score_news(news))
}
