//! Strongest / weakest currency board for the dashboard.

use super::impact::CurrencyImpact;
use serde::Serialize;

/// How many currencies each side of the board shows.
pub const BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyStrength {
    pub currency: String,
    pub strength: f64,
    pub mentions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrengthBoard {
    /// Highest normalized strength first
    pub strongest: Vec<CurrencyStrength>,
    /// Lowest normalized strength first
    pub weakest: Vec<CurrencyStrength>,
}

/// All currencies sorted by normalized strength, strongest first.
pub fn sorted_strengths(impact: &CurrencyImpact) -> Vec<CurrencyStrength> {
    let mut all: Vec<_> = impact
        .iter()
        .map(|(currency, i)| CurrencyStrength {
            currency: currency.to_string(),
            strength: i.normalized(),
            mentions: i.mentions,
        })
        .collect();
    all.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    all
}

/// Top and bottom of the sorted list. With fewer than six currencies the two
/// sides overlap.
pub fn strength_board(impact: &CurrencyImpact) -> StrengthBoard {
    let all = sorted_strengths(impact);
    let strongest = all.iter().take(BOARD_SIZE).cloned().collect();
    let weakest = all.iter().rev().take(BOARD_SIZE).cloned().collect();
    StrengthBoard { strongest, weakest }
}
