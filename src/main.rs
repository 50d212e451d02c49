//! # News Scraper
//!
//! Extracts a normalized list of news articles (title, author, publication
//! date, source, link) either from a fixed set of known sites or from an
//! arbitrary homepage supplied by the caller.
//!
//! ## Usage
//!
//! ```sh
//! news_scraper scrape --url https://techcrunch.com --keyword ai
//! news_scraper serve --listen 127.0.0.1:5000
//! ```
//!
//! ## Architecture
//!
//! The generic path follows a pipeline architecture:
//! 1. **Fetching**: Download the target homepage
//! 2. **Discovery**: Rank anchors with selector heuristics and keep the best candidates
//! 3. **Extraction**: Visit candidates concurrently (8 at a time) and read metadata
//! 4. **Aggregation**: Keyword filter and sort
//!
//! Without a URL, four fixed-site scrapers run concurrently instead.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod config;
mod dates;
mod discovery;
mod document;
mod extractor;
mod fetcher;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod server;
mod utils;

use cli::{Cli, Command};
use config::ScraperConfig;
use fetcher::HttpFetcher;
use models::{Article, ExtractionRequest};
use outputs::json;
use server::AppState;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_scraper starting up");

    let args = Cli::parse();
    debug!(?args.config, "Parsed CLI arguments");

    let config = ScraperConfig::load(args.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config.user_agent)?;

    match args.command {
        Command::Scrape {
            url,
            keyword,
            sort_by,
            json_output_dir,
        } => {
            let request = ExtractionRequest::new(url.as_deref(), keyword.as_deref(), sort_by)?;
            run_scrape(&fetcher, &config, &request, json_output_dir.as_deref()).await?;
        }
        Command::Serve { listen } => {
            let addr = listen.unwrap_or_else(|| config.listen_addr.clone());
            let state = Arc::new(AppState { fetcher, config });
            server::serve(&addr, state).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn run_scrape(
    fetcher: &HttpFetcher,
    config: &ScraperConfig,
    request: &ExtractionRequest,
    json_output_dir: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    // Early check: fail before any network traffic if the output dir is unusable
    if let Some(dir) = json_output_dir {
        ensure_writable_dir(dir).await?;
    }

    let articles = pipeline::scrape_news(fetcher, config, request).await;
    report_advisories(&articles);

    match json_output_dir {
        Some(dir) => {
            let path = json::write_articles(&articles, dir).await?;
            info!(%path, count = articles.len(), "Articles written");
        }
        None => println!("{}", serde_json::to_string_pretty(&articles)?),
    }
    Ok(())
}

/// Surface reachability problems and empty results without raw error chains.
fn report_advisories(articles: &[Article]) {
    if articles.is_empty() {
        warn!(
            "No articles found. The website might not be supported or may be blocking scraping requests."
        );
    }
    for article in articles.iter().filter(|a| a.is_error()) {
        warn!(
            link = %article.link,
            reason = %truncate_for_log(article.error.as_deref().unwrap_or_default(), 200),
            "Target could not be reached"
        );
    }
}
