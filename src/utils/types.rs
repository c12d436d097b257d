//! Common types used throughout the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a currency pair (e.g., EUR/USD)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    /// Create a new currency pair
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        }
    }

    /// Parse a currency pair from a string (e.g., "EUR/USD")
    pub fn parse(s: &str) -> Option<Self> {
        let (base, quote) = s.split_once('/')?;
        if base.trim().is_empty() || quote.trim().is_empty() || quote.contains('/') {
            return None;
        }
        Some(Self::new(base.trim(), quote.trim()))
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid currency pair '{}'", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_display_and_parse() {
        let pair = CurrencyPair::new("eur", "usd");
        assert_eq!(pair.to_string(), "EUR/USD");
        assert_eq!(CurrencyPair::parse("EUR/USD"), Some(pair));
        assert_eq!(CurrencyPair::parse("EURUSD"), None);
        assert_eq!(CurrencyPair::parse("EUR/USD/JPY"), None);
        assert_eq!(CurrencyPair::parse("/USD"), None);
    }

    #[test]
    fn test_pair_serializes_as_string() {
        let pair = CurrencyPair::new("GBP", "JPY");
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"GBP/JPY\"");
        let back: CurrencyPair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }
}
