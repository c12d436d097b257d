//! Fixed table of market-moving keywords.

use crate::utils::error::{Error, Result};
use serde::Serialize;

/// A keyword whose appearance in a headline moves a set of currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketCondition {
    pub keyword: &'static str,
    /// Signed weight added to each affected currency's score per match
    pub impact: f64,
    pub currencies: &'static [&'static str],
}

impl MarketCondition {
    /// Case-insensitive substring test against already-lowercased text.
    pub fn matches(&self, lowercase_text: &str) -> bool {
        lowercase_text.contains(&self.keyword.to_lowercase())
    }
}

/// Conditions in evaluation order. Order matters: it decides which currency
/// enters the impact map first.
///
/// The first eight rows are the source keyword table. The last row,
/// `rate cut`, is an addition that fills the table to nine entries; it is not
/// source data. A headline matching both `interest rate` and `rate cut`
/// nets to zero for the shared currencies but still counts two mentions.
pub static MARKET_CONDITIONS: &[MarketCondition] = &[
    MarketCondition { keyword: "hawkish", impact: 1.0, currencies: &["USD", "EUR", "GBP"] },
    MarketCondition { keyword: "dovish", impact: -1.0, currencies: &["USD", "EUR", "GBP"] },
    MarketCondition { keyword: "inflation", impact: 1.0, currencies: &["USD", "EUR", "GBP"] },
    MarketCondition { keyword: "GDP", impact: 0.8, currencies: &["USD", "EUR", "GBP", "JPY"] },
    MarketCondition {
        keyword: "employment",
        impact: 0.9,
        currencies: &["USD", "EUR", "GBP", "CAD"],
    },
    MarketCondition { keyword: "PMI", impact: 0.7, currencies: &["EUR", "GBP", "JPY"] },
    MarketCondition { keyword: "retail sales", impact: 0.6, currencies: &["USD", "GBP", "AUD"] },
    MarketCondition {
        keyword: "interest rate",
        impact: 1.0,
        currencies: &["USD", "EUR", "GBP", "JPY"],
    },
    MarketCondition { keyword: "rate cut", impact: -1.0, currencies: &["USD", "EUR", "GBP", "JPY"] },
];

/// Reject entries that could never contribute anything.
pub fn validate_conditions(conditions: &[MarketCondition]) -> Result<()> {
    for cond in conditions {
        if cond.keyword.trim().is_empty() {
            return Err(Error::ConfigError("market condition keyword must not be empty".into()));
        }
        if cond.currencies.is_empty() {
            return Err(Error::ConfigError(format!(
                "market condition '{}' affects no currency",
                cond.keyword
            )));
        }
        if cond.impact == 0.0 || !cond.impact.is_finite() {
            return Err(Error::ConfigError(format!(
                "market condition '{}' has a zero or non-finite impact",
                cond.keyword
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert_eq!(MARKET_CONDITIONS.len(), 9);
        assert!(validate_conditions(MARKET_CONDITIONS).is_ok());
    }

    #[test]
    fn test_added_rate_cut_row_is_last() {
        let last = MARKET_CONDITIONS[MARKET_CONDITIONS.len() - 1];
        assert_eq!(last.keyword, "rate cut");
        assert_eq!(last.impact, -1.0);
        assert!(MARKET_CONDITIONS[..8].iter().all(|c| c.keyword != "rate cut"));
    }

    #[test]
    fn test_zero_impact_rejected() {
        let bad = [MarketCondition { keyword: "noise", impact: 0.0, currencies: &["USD"] }];
        let err = validate_conditions(&bad).unwrap_err();
        assert!(err.to_string().contains("noise"));
    }

    #[test]
    fn test_empty_currency_set_rejected() {
        let bad = [MarketCondition { keyword: "orphan", impact: 1.0, currencies: &[] }];
        assert!(validate_conditions(&bad).is_err());
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let gdp = MARKET_CONDITIONS.iter().find(|c| c.keyword == "GDP").unwrap();
        assert!(gdp.matches("us gdp beats expectations"));
        assert!(!gdp.matches("us payrolls beat expectations"));
    }
}
