//! fxpulse CLI: dashboard server, one-shot analysis, sessions and chat.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use fxpulse::analysis::{analyze, validate_conditions, MarketAnalysis, MARKET_CONDITIONS};
use fxpulse::assistant::Assistant;
use fxpulse::config::{generate_commented_config_template, Config};
use fxpulse::dashboard::{self, DashboardState};
use fxpulse::news::{shared_snapshot, FeedSource, FileFeed, NewsItem, NewsPoller, RssFeed};
use fxpulse::sessions::session_status;
use fxpulse::utils::init_logging;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "fxpulse", author, version, about = "Forex news impact dashboard", long_about = None)]
struct Args {
    /// Path to the configuration file (TOML); defaults to ./config.toml or the user config dir
    #[arg(short, long, env = "FXPULSE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print the default configuration to stdout and exit
    #[arg(long)]
    print_default_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll the news feed and serve the web dashboard
    Serve {
        /// Override the dashboard bind address
        #[arg(long)]
        bind: Option<String>,
    },
    /// Score a news batch once and print the analysis
    Analyze {
        /// RSS file or http(s) URL; defaults to the configured feed
        #[arg(long)]
        feed: Option<String>,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
        /// Ask the assistant to analyse the first N articles
        #[arg(long, value_name = "N")]
        explain: Option<usize>,
    },
    /// Show which trading sessions are open right now
    Sessions,
    /// Ask the assistant a question about the current news
    Chat {
        message: String,
        /// RSS file or http(s) URL; defaults to the configured feed
        #[arg(long)]
        feed: Option<String>,
    },
    /// Write a configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
        /// Write the annotated template instead of the plain defaults
        #[arg(long)]
        commented: bool,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Load and validate the configuration
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if args.print_default_config {
        println!("{}", Config::default_toml());
        return Ok(());
    }

    let command = args.command.unwrap_or(Command::Serve { bind: None });
    // `init` must work even when the current configuration does not load
    let config = match &command {
        | Command::Init { .. } => Config::default(),
        | _ => load_config(args.config.as_ref())?,
    };
    init_logging(&config.app.log_level);

    match command {
        | Command::Serve { bind } => serve(config, bind).await,
        | Command::Analyze { feed, json, explain } => run_analyze(&config, feed, json, explain).await,
        | Command::Sessions => {
            for s in session_status(Utc::now()) {
                println!("{:<9} {}  {}", s.name, s.hours, if s.open { "open" } else { "closed" });
            }
            Ok(())
        }
        | Command::Chat { message, feed } => run_chat(&config, &message, feed).await,
        | Command::Init { output, commented, force } => init_config(&output, commented, force),
        | Command::CheckConfig => {
            config.validate()?;
            validate_conditions(MARKET_CONDITIONS)?;
            println!("Configuration OK (model {}, feed {})", config.assistant.model, config.feed.url);
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        | Some(p) => Config::from_file(p).with_context(|| format!("Failed to load configuration {}", p.display())),
        | None => Config::load().context("Failed to load configuration"),
    }
}

/// Write plain defaults, never values picked up from the environment.
fn init_config(output: &Path, commented: bool, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("Config file {} exists. Use --force to overwrite.", output.display());
    }
    if commented {
        generate_commented_config_template(output)?;
    } else {
        Config::default().save(output)?;
    }
    println!("Wrote configuration to {}", output.display());
    Ok(())
}

fn feed_source(config: &Config, feed: Option<String>) -> Result<Arc<dyn FeedSource>> {
    let source: Arc<dyn FeedSource> = match feed {
        | Some(f) if f.starts_with("http://") || f.starts_with("https://") => Arc::new(RssFeed::new(
            f,
            config.feed.proxy.clone(),
            Duration::from_secs(config.feed.timeout_secs),
        )?),
        | Some(f) => Arc::new(FileFeed::new(f)),
        | None => Arc::new(RssFeed::from_config(&config.feed)?),
    };
    Ok(source)
}

async fn fetch_news(config: &Config, feed: Option<String>) -> Result<Vec<NewsItem>> {
    let source = feed_source(config, feed)?;
    let news = source.fetch().await.with_context(|| format!("Failed to fetch {}", source.describe()))?;
    log::info!("fetched {} items from {}", news.len(), source.describe());
    Ok(news)
}

async fn serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(b) = bind {
        config.dashboard.bind_addr = b;
    }
    config.validate()?;
    validate_conditions(MARKET_CONDITIONS)?;
    fxpulse::metrics::init()?;

    let source = feed_source(&config, None)?;
    let snapshot = shared_snapshot();
    let poller = NewsPoller::new(
        source,
        snapshot.clone(),
        Duration::from_secs(config.feed.refresh_interval_secs),
    );
    tokio::spawn(poller.run());

    if config.assistant.api_key.is_empty() {
        log::warn!("No assistant API key configured; /api/chat will be unavailable");
    }
    let assistant = Arc::new(Assistant::from_config(&config.assistant)?);
    let state = DashboardState::new(snapshot, assistant);
    dashboard::run(&config.dashboard.bind_addr, state).await?;
    Ok(())
}

async fn run_analyze(config: &Config, feed: Option<String>, json: bool, explain: Option<usize>) -> Result<()> {
    let news = fetch_news(config, feed).await?;
    let analysis = analyze(&news);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&news, &analysis);
    }

    if let Some(n) = explain {
        let assistant = Assistant::from_config(&config.assistant)?;
        for item in news.iter().take(n) {
            let a = assistant.analyze_article(item).await?;
            println!("\n== {} ==", item.title);
            println!("Sentiment: {}", a.sentiment);
            println!("Currencies: {}", a.currencies.join(", "));
            println!("Pairs: {}", a.pairs.join(", "));
            println!("Opportunity: {}", a.opportunity);
            println!("Volatility: {}", a.volatility);
            println!("Trading time: {}", a.trading_time);
            println!("Reasoning: {}", a.reasoning);
        }
    }
    Ok(())
}

fn print_analysis(news: &[NewsItem], analysis: &MarketAnalysis) {
    println!("{} news items", news.len());
    println!("\nCurrency impact:");
    for (currency, impact) in analysis.impact.iter() {
        println!(
            "  {:<4} score {:>7.2}  mentions {:>3}  normalized {:>6.2}",
            currency,
            impact.score,
            impact.mentions,
            impact.normalized()
        );
    }

    println!("\nStrongest:");
    for c in &analysis.board.strongest {
        println!("  {:<4} {:>6.2}", c.currency, c.strength);
    }
    println!("Weakest:");
    for c in &analysis.board.weakest {
        println!("  {:<4} {:>6.2}", c.currency, c.strength);
    }

    println!("\nOpportunities:");
    if analysis.opportunities.is_empty() {
        println!("  none");
    }
    for o in &analysis.opportunities {
        println!("  {:<8} strength {:>6.2}  confidence {:.2}", o.pair.to_string(), o.strength, o.confidence);
    }

    println!("\n{}", analysis.suggestion);
}

async fn run_chat(config: &Config, message: &str, feed: Option<String>) -> Result<()> {
    let assistant = Assistant::from_config(&config.assistant)?;
    let news = fetch_news(config, feed).await?;
    let reply = assistant.respond(message, &news).await?;

    println!("{}", reply);
    if let Some(cost) = &reply.cost {
        println!(
            "\n[{}: ~{} in / ~{} out tokens, ~{:.4} EUR]",
            cost.model, cost.input_tokens, cost.output_tokens, cost.total_cost
        );
    }
    if !reply.follow_ups.is_empty() {
        println!("\nYou could also ask:");
        for q in &reply.follow_ups {
            println!("  - {}", q);
        }
    }
    Ok(())
}
