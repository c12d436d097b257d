//! Pairwise strength differentials and opportunity ranking.

use super::impact::CurrencyImpact;
use crate::utils::types::CurrencyPair;
use serde::{Deserialize, Serialize};

/// Minimum |strength| for a pair to be surfaced.
pub const MIN_SIGNAL_STRENGTH: f64 = 0.5;
/// Minimum confidence for a pair to be surfaced.
pub const MIN_CONFIDENCE: f64 = 0.3;
/// Mention count that maps to a confidence of 1.0. Not a cap.
pub const CONFIDENCE_SCALE: f64 = 10.0;

/// A currency pair with a large enough strength differential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub pair: CurrencyPair,
    /// normalized(base) - normalized(quote); positive favours the base
    pub strength: f64,
    /// min(mentions) / 10, may exceed 1.0
    pub confidence: f64,
}

/// Rank every currency pair in `impact` by descending |strength|.
///
/// Pairs are enumerated base-outer, quote-inner over the map's insertion
/// order; the sort is stable so ties keep that order.
pub fn rank_opportunities(impact: &CurrencyImpact) -> Vec<Opportunity> {
    let entries: Vec<_> = impact.iter().collect();
    let mut pairs = Vec::new();

    for (i, (base, base_impact)) in entries.iter().enumerate() {
        for (quote, quote_impact) in &entries[i + 1..] {
            let strength = base_impact.normalized() - quote_impact.normalized();
            let confidence =
                f64::from(base_impact.mentions.min(quote_impact.mentions)) / CONFIDENCE_SCALE;

            if strength.abs() >= MIN_SIGNAL_STRENGTH && confidence >= MIN_CONFIDENCE {
                pairs.push(Opportunity { pair: CurrencyPair::new(base, quote), strength, confidence });
            }
        }
    }

    pairs.sort_by(|a, b| b.strength.abs().total_cmp(&a.strength.abs()));
    log::debug!("{} opportunities above thresholds", pairs.len());
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::impact::Impact;

    fn map(entries: &[(&str, f64, u32)]) -> CurrencyImpact {
        entries.iter().map(|(c, s, m)| (*c, Impact::new(*s, *m))).collect()
    }

    #[test]
    fn test_empty_and_single_currency_give_nothing() {
        assert!(rank_opportunities(&CurrencyImpact::new()).is_empty());
        assert!(rank_opportunities(&map(&[("USD", 5.0, 5)])).is_empty());
    }

    #[test]
    fn test_base_is_first_inserted_currency() {
        let ranked = rank_opportunities(&map(&[("EUR", -3.0, 3), ("USD", 3.0, 3)]));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].pair.to_string(), "EUR/USD");
        assert!((ranked[0].strength + 2.0).abs() < 1e-12);
        assert!((ranked[0].confidence - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_low_confidence_filtered() {
        let ranked = rank_opportunities(&map(&[("USD", 4.0, 4), ("JPY", -2.0, 2)]));
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_zero_mentions_uses_raw_score() {
        // Never produced by the scorer, but the floor must hold for synthetic input.
        let ranked = rank_opportunities(&map(&[("USD", 0.8, 0), ("EUR", 0.0, 5)]));
        assert!(ranked.is_empty(), "confidence is zero with a zero-mention side");
    }
}
