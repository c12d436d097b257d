//! Integration tests: keyword scoring over whole news batches.

use fxpulse::analysis::{score_news, Impact, NEWS_WINDOW};
use fxpulse::news::{parse_rss, NewsItem};

fn items(n: usize, title: &str, description: &str) -> Vec<NewsItem> {
    (0..n).map(|_| NewsItem::new(title, description)).collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn inflation_and_rates_batch() {
    let news = items(10, "Inflation surprise", "Markets reprice the interest rate path");
    let impact = score_news(&news);

    let order: Vec<&str> = impact.currencies().collect();
    assert_eq!(order, vec!["USD", "EUR", "GBP", "JPY"]);

    for c in ["USD", "EUR", "GBP"] {
        let i = impact.impact_of(c);
        assert!(approx(i.score, 20.0), "{} score {}", c, i.score);
        assert_eq!(i.mentions, 20);
    }
    let jpy = impact.impact_of("JPY");
    assert!(approx(jpy.score, 10.0));
    assert_eq!(jpy.mentions, 10);
}

#[test]
fn only_the_first_ten_items_count() {
    let mut news = items(NEWS_WINDOW, "GDP beat", "");
    let baseline = score_news(&news);

    news.extend(items(5, "Hawkish surprise", "Employment and PMI strong"));
    assert_eq!(score_news(&news), baseline);

    news.insert(0, NewsItem::new("quiet day", ""));
    let shifted = score_news(&news);
    assert_eq!(shifted.impact_of("USD").mentions, 9);
}

#[test]
fn scoring_is_deterministic() {
    let news = vec![
        NewsItem::new("Retail sales jump", "Employment steady"),
        NewsItem::new("BoJ hints at rate cut", "PMI soft"),
        NewsItem::new("ECB dovish", ""),
    ];
    let first = score_news(&news);
    for _ in 0..5 {
        assert_eq!(score_news(&news), first);
    }
    let json_a = serde_json::to_string(&first).unwrap();
    let json_b = serde_json::to_string(&score_news(&news)).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn mentions_track_matches_and_never_go_negative() {
    let news = vec![
        NewsItem::new("Dovish Fed", ""),
        NewsItem::new("Another dovish turn", "rate cut priced"),
    ];
    let impact = score_news(&news);
    for (currency, i) in impact.iter() {
        assert!(i.mentions > 0, "{} listed with no mentions", currency);
    }
    assert_eq!(impact.impact_of("USD"), Impact::new(-3.0, 3));
    assert_eq!(impact.impact_of("JPY"), Impact::new(-1.0, 1));
    assert_eq!(impact.impact_of("CHF"), Impact::default());
}

#[test]
fn fixture_feed_scores_growth_then_dovish_batch() {
    let xml = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/feed.xml")).unwrap();
    let news = parse_rss(&xml).unwrap();
    assert_eq!(news.len(), 8);
    assert_eq!(news[6].title, "BoE\u{2019}s Bailey sounds dovish");
    assert_eq!(news[1].description, "Output slips 0.1% q/q & misses");

    let impact = score_news(&news);
    for c in ["USD", "EUR", "GBP"] {
        let i = impact.impact_of(c);
        assert_eq!(i.mentions, 8);
        assert!(approx(i.score, -0.8));
        assert!(approx(i.normalized(), -0.1));
    }
    let jpy = impact.impact_of("JPY");
    assert_eq!(jpy.mentions, 4);
    assert!(approx(jpy.normalized(), 0.8));
}
