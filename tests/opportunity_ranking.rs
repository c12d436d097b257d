//! Integration tests: ranking pairs from an impact map and formatting the
//! resulting suggestion.

use fxpulse::analysis::{analyze, rank_opportunities, suggest, CurrencyImpact, Impact, Suggestion};
use fxpulse::news::NewsItem;
use rstest::rstest;

fn impact(entries: &[(&str, f64, u32)]) -> CurrencyImpact {
    entries.iter().map(|(c, s, m)| (*c, Impact::new(*s, *m))).collect()
}

#[test]
fn confidence_is_not_capped() {
    let map = impact(&[("USD", 12.0, 12), ("JPY", -12.0, 12)]);
    let ranked = rank_opportunities(&map);
    assert_eq!(ranked.len(), 1);
    assert!((ranked[0].confidence - 1.2).abs() < 1e-9);
    assert!((ranked[0].strength - 2.0).abs() < 1e-9);
}

#[rstest]
#[case(0.49, 0)]
#[case(0.5, 1)]
#[case(-0.5, 1)]
#[case(-0.49, 0)]
fn strength_threshold(#[case] base_normalized: f64, #[case] expected: usize) {
    let map = impact(&[("EUR", base_normalized * 4.0, 4), ("CHF", 0.0, 4)]);
    assert_eq!(rank_opportunities(&map).len(), expected);
}

#[test]
fn ranked_by_descending_magnitude() {
    let map = impact(&[("AAA", 0.0, 5), ("BBB", 3.0, 5), ("CCC", 4.5, 5), ("DDD", -3.5, 5)]);
    let ranked = rank_opportunities(&map);
    let strengths: Vec<f64> = ranked.iter().map(|o| (o.strength.abs() * 100.0).round() / 100.0).collect();
    assert_eq!(strengths, vec![1.6, 1.3, 0.9, 0.7, 0.6]);
    assert_eq!(ranked[0].pair.to_string(), "CCC/DDD");
    assert_eq!(ranked[2].pair.to_string(), "AAA/CCC");
}

#[test]
fn moderate_signals_give_no_opportunity() {
    let map = impact(&[("USD", 2.0, 2), ("EUR", -1.0, 2), ("GBP", 0.5, 1)]);
    let ranked = rank_opportunities(&map);
    assert!(ranked.is_empty());

    let s = suggest(&ranked);
    assert_eq!(s, Suggestion::NoOpportunity);
    assert_eq!(s.to_string(), "No significant opportunities detected at the moment.");
}

#[test]
fn ties_keep_enumeration_order() {
    let mut news: Vec<NewsItem> = (0..4).map(|_| NewsItem::new("GDP print", "")).collect();
    news.extend((0..4).map(|_| NewsItem::new("Central bank turns dovish", "")));

    let analysis = analyze(&news);
    let pairs: Vec<String> = analysis.opportunities.iter().map(|o| o.pair.to_string()).collect();
    assert_eq!(pairs, vec!["USD/JPY", "EUR/JPY", "GBP/JPY"]);
    for o in &analysis.opportunities {
        assert!((o.strength + 0.9).abs() < 1e-9);
        assert!((o.confidence - 0.4).abs() < 1e-9);
    }

    assert_eq!(
        analysis.suggestion.to_string(),
        "Best opportunity: USD/JPY\nDirection: SHORT\nSignal strength: 0.90\nConfidence: moderate (40.0%)"
    );
    assert!(analysis.suggestion.is_actionable());
}

#[test]
fn board_lists_strongest_and_weakest() {
    let mut news: Vec<NewsItem> = (0..4).map(|_| NewsItem::new("GDP print", "")).collect();
    news.extend((0..4).map(|_| NewsItem::new("Central bank turns dovish", "")));
    let board = analyze(&news).board;
    assert_eq!(board.strongest[0].currency, "JPY");
    assert_eq!(board.weakest.len(), 3);
    assert!(board.weakest.iter().all(|c| c.currency != "JPY"));
}
