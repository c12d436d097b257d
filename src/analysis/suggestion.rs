//! Human-readable trading suggestion built from the top-ranked opportunity.

use super::opportunity::Opportunity;
use crate::utils::types::CurrencyPair;
use serde::Serialize;
use std::fmt;

/// Shown when no pair clears the ranking thresholds.
pub const NO_OPPORTUNITY_MESSAGE: &str = "No significant opportunities detected at the moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn from_strength(strength: f64) -> Self {
        if strength > 0.0 {
            Direction::Long
        } else {
            Direction::Short
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Direction::Long => write!(f, "LONG"),
            | Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// Qualitative bucket for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Moderate,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.7 {
            ConfidenceLevel::High
        } else if confidence >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Moderate
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            | ConfidenceLevel::High => "high",
            | ConfidenceLevel::Medium => "medium",
            | ConfidenceLevel::Moderate => "moderate",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    NoOpportunity,
    Best {
        pair: CurrencyPair,
        direction: Direction,
        /// |strength| of the opportunity
        magnitude: f64,
        level: ConfidenceLevel,
        /// confidence * 100, unclamped
        confidence_pct: f64,
    },
}

impl Suggestion {
    pub fn is_actionable(&self) -> bool {
        matches!(self, Suggestion::Best { .. })
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Suggestion::NoOpportunity => f.write_str(NO_OPPORTUNITY_MESSAGE),
            | Suggestion::Best { pair, direction, magnitude, level, confidence_pct } => {
                writeln!(f, "Best opportunity: {}", pair)?;
                writeln!(f, "Direction: {}", direction)?;
                writeln!(f, "Signal strength: {:.2}", magnitude)?;
                write!(f, "Confidence: {} ({:.1}%)", level, confidence_pct)
            }
        }
    }
}

/// Build a suggestion from a ranked list; only the first entry is used.
pub fn suggest(opportunities: &[Opportunity]) -> Suggestion {
    let Some(best) = opportunities.first() else {
        return Suggestion::NoOpportunity;
    };
    Suggestion::Best {
        pair: best.pair.clone(),
        direction: Direction::from_strength(best.strength),
        magnitude: best.strength.abs(),
        level: ConfidenceLevel::from_confidence(best.confidence),
        confidence_pct: best.confidence * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn opp(pair: &str, strength: f64, confidence: f64) -> Opportunity {
        Opportunity { pair: CurrencyPair::parse(pair).unwrap(), strength, confidence }
    }

    #[test]
    fn test_empty_list_gives_fixed_message() {
        let s = suggest(&[]);
        assert_eq!(s, Suggestion::NoOpportunity);
        assert_eq!(s.to_string(), NO_OPPORTUNITY_MESSAGE);
        assert!(!s.is_actionable());
    }

    #[rstest]
    #[case(0.9, ConfidenceLevel::High)]
    #[case(0.7, ConfidenceLevel::High)]
    #[case(0.69, ConfidenceLevel::Medium)]
    #[case(0.5, ConfidenceLevel::Medium)]
    #[case(0.49, ConfidenceLevel::Moderate)]
    #[case(0.3, ConfidenceLevel::Moderate)]
    #[case(1.2, ConfidenceLevel::High)]
    fn test_confidence_levels(#[case] confidence: f64, #[case] expected: ConfidenceLevel) {
        assert_eq!(ConfidenceLevel::from_confidence(confidence), expected);
    }

    #[rstest]
    #[case(0.8, Direction::Long)]
    #[case(-0.8, Direction::Short)]
    #[case(0.0, Direction::Short)]
    fn test_direction(#[case] strength: f64, #[case] expected: Direction) {
        assert_eq!(Direction::from_strength(strength), expected);
    }

    #[test]
    fn test_uses_first_opportunity_only() {
        let s = suggest(&[opp("EUR/JPY", -1.234, 0.55), opp("USD/CAD", 0.9, 0.9)]);
        assert_eq!(
            s.to_string(),
            "Best opportunity: EUR/JPY\nDirection: SHORT\nSignal strength: 1.23\nConfidence: medium (55.0%)"
        );
    }

    #[test]
    fn test_confidence_above_one_is_rendered_as_is() {
        let s = suggest(&[opp("USD/JPY", 0.75, 1.2)]);
        assert!(s.to_string().ends_with("Confidence: high (120.0%)"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(suggest(&[opp("GBP/USD", 0.6, 0.4)])).unwrap();
        assert_eq!(json["kind"], "best");
        assert_eq!(json["pair"], "GBP/USD");
        assert_eq!(json["direction"], "LONG");
        assert_eq!(json["level"], "moderate");
    }
}
