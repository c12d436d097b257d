//! Keyword impact scoring over recent headlines.

use super::conditions::{MarketCondition, MARKET_CONDITIONS};
use crate::news::NewsItem;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// Only the most recent items of a feed are scored.
pub const NEWS_WINDOW: usize = 10;

/// Accumulated signed score and match count for one currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct Impact {
    pub score: f64,
    pub mentions: u32,
}

impl Impact {
    pub fn new(score: f64, mentions: u32) -> Self {
        Self { score, mentions }
    }

    /// Average contribution per mention, with the divisor floored at 1.
    pub fn normalized(&self) -> f64 {
        self.score / f64::from(self.mentions.max(1))
    }
}

/// Per-currency impact keyed by currency code.
///
/// Iteration follows insertion order: the first currency to receive a
/// contribution comes first. Pair enumeration in the ranker relies on it to
/// decide which side of a pair is the base.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyImpact {
    entries: Vec<(String, Impact)>,
}

impl CurrencyImpact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the impact for `currency`, keeping its original position when it
    /// is already present.
    pub fn insert(&mut self, currency: impl Into<String>, impact: Impact) {
        let currency = currency.into();
        match self.entries.iter_mut().find(|(c, _)| *c == currency) {
            | Some((_, existing)) => *existing = impact,
            | None => self.entries.push((currency, impact)),
        }
    }

    /// Add one mention of `weight` to `currency`.
    fn record(&mut self, currency: &str, weight: f64) {
        let idx = match self.entries.iter().position(|(c, _)| c == currency) {
            | Some(idx) => idx,
            | None => {
                self.entries.push((currency.to_string(), Impact::default()));
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[idx].1;
        entry.score += weight;
        entry.mentions += 1;
    }

    pub fn get(&self, currency: &str) -> Option<&Impact> {
        self.entries.iter().find(|(c, _)| c == currency).map(|(_, i)| i)
    }

    /// Impact of `currency`, neutral when it was never mentioned.
    pub fn impact_of(&self, currency: &str) -> Impact {
        self.get(currency).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Impact)> {
        self.entries.iter().map(|(c, i)| (c.as_str(), i))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Impact)> for CurrencyImpact {
    fn from_iter<I: IntoIterator<Item = (S, Impact)>>(iter: I) -> Self {
        let mut map = CurrencyImpact::new();
        for (currency, impact) in iter {
            map.insert(currency, impact);
        }
        map
    }
}

impl Serialize for CurrencyImpact {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (currency, impact) in &self.entries {
            map.serialize_entry(currency, impact)?;
        }
        map.end()
    }
}

/// Score the first [`NEWS_WINDOW`] items against the built-in condition table.
pub fn score_news(news: &[NewsItem]) -> CurrencyImpact {
    score_news_with(news, MARKET_CONDITIONS)
}

/// Score against an arbitrary condition table.
pub fn score_news_with(news: &[NewsItem], conditions: &[MarketCondition]) -> CurrencyImpact {
    let mut impact = CurrencyImpact::new();
    for item in news.iter().take(NEWS_WINDOW) {
        let content = format!("{} {}", item.title, item.description).to_lowercase();
        for cond in conditions {
            if !cond.matches(&content) {
                continue;
            }
            for currency in cond.currencies {
                impact.record(currency, cond.impact);
            }
        }
    }
    log::debug!(
        "scored {} of {} news items: {} currencies affected",
        news.len().min(NEWS_WINDOW),
        news.len(),
        impact.len()
    );
    impact
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: &str) -> NewsItem {
        NewsItem { title: title.into(), description: description.into(), ..Default::default() }
    }

    #[test]
    fn test_empty_input_gives_empty_map() {
        assert!(score_news(&[]).is_empty());
    }

    #[test]
    fn test_single_keyword_hits_every_listed_currency() {
        let impact = score_news(&[item("Fed sounds hawkish", "")]);
        let codes: Vec<_> = impact.currencies().collect();
        assert_eq!(codes, vec!["USD", "EUR", "GBP"]);
        for code in codes {
            assert_eq!(impact.impact_of(code), Impact::new(1.0, 1));
        }
    }

    #[test]
    fn test_matches_title_and_description_case_insensitively() {
        let impact = score_news(&[item("Japan PMI", "Retail Sales jump in the UK")]);
        assert_eq!(impact.impact_of("AUD"), Impact::new(0.6, 1));
        assert_eq!(impact.impact_of("JPY"), Impact::new(0.7, 1));
        let gbp = impact.impact_of("GBP");
        assert_eq!(gbp.mentions, 2);
        assert!((gbp.score - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_conditions_accumulate() {
        // "interest rate cut" fires both "interest rate" and "rate cut"
        let impact = score_news(&[item("BoJ interest rate cut", "")]);
        let jpy = impact.impact_of("JPY");
        assert_eq!(jpy.mentions, 2);
        assert!(jpy.score.abs() < 1e-12);
    }

    #[test]
    fn test_absent_currency_is_neutral() {
        let impact = score_news(&[item("hawkish", "")]);
        assert_eq!(impact.get("CHF"), None);
        assert_eq!(impact.impact_of("CHF"), Impact::default());
    }

    #[test]
    fn test_normalized_floors_mentions_at_one() {
        assert_eq!(Impact::new(0.4, 0).normalized(), 0.4);
        assert_eq!(Impact::new(3.0, 2).normalized(), 1.5);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut map: CurrencyImpact =
            vec![("USD", Impact::new(1.0, 1)), ("EUR", Impact::new(2.0, 2))].into_iter().collect();
        map.insert("USD", Impact::new(5.0, 5));
        let codes: Vec<_> = map.currencies().collect();
        assert_eq!(codes, vec!["USD", "EUR"]);
        assert_eq!(map.impact_of("USD"), Impact::new(5.0, 5));
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let map: CurrencyImpact =
            vec![("JPY", Impact::new(1.0, 1)), ("AUD", Impact::new(-1.0, 1))].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"JPY":{"score":1.0,"mentions":1},"AUD":{"score":-1.0,"mentions":1}}"#
        );
    }
}
