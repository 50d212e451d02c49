//! Command-line interface definitions for the news scraper.
//!
//! This module defines the CLI arguments and subcommands using the `clap` crate.
//! Global options can also be provided via environment variables.

use crate::models::SortBy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the news scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape the default sites and print JSON
/// news_scraper scrape
///
/// # Scrape one site, filtered and sorted, into a JSON directory
/// news_scraper scrape --url https://techcrunch.com --keyword ai --sort-by date -j ./json
///
/// # Serve GET /api/news
/// news_scraper --config scraper.yaml serve --listen 0.0.0.0:5000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long, global = true, env = "NEWS_SCRAPER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape once and emit the article list as JSON
    Scrape {
        /// Homepage to scrape; omit to use the built-in sites
        #[arg(short, long)]
        url: Option<String>,

        /// Keep only articles mentioning this keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Result ordering
        #[arg(short, long, value_enum, default_value_t = SortBy::Default)]
        sort_by: SortBy,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        json_output_dir: Option<String>,
    },
    /// Serve the news API over HTTP
    Serve {
        /// Address to bind, overriding the config file
        #[arg(short, long, env = "NEWS_SCRAPER_LISTEN")]
        listen: Option<String>,
    },
}
