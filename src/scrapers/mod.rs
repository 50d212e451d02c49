//! Fixed-site scrapers used when no target URL is given.
//!
//! Each site's markup is known, so instead of heuristics every scraper uses a
//! single link selector and reads a handful of known meta tags. BBC, The Verge
//! and CNN follow the same two-phase pattern, described by a [`SiteProfile`]:
//!
//! 1. **Indexing**: Collect article URLs from the homepage with the profile's selector
//! 2. **Fetching**: Download each article in turn and read its meta tags
//!
//! Hacker News lists everything on one page and needs no per-article fetch.
//!
//! # Supported Sources
//!
//! | Source | Module | Link selector |
//! |--------|--------|---------------|
//! | BBC News | [`bbc`] | `a.gs-c-promo-heading` |
//! | The Verge | [`verge`] | `a[data-analytics-link="article"]` |
//! | CNN | [`cnn`] | `a[href^="/202"]` |
//! | Hacker News | [`hackernews`] | `.athing .titleline > a` |
//!
//! A site whose homepage cannot be fetched contributes nothing; an article that
//! cannot be fetched is skipped. Neither affects the other sites.

use crate::config::ScraperConfig;
use crate::discovery::resolve_href;
use crate::document::Document;
use crate::extractor::Probe;
use crate::fetcher::{Fetch, FetchError};
use crate::models::{Article, UNKNOWN};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use scraper::Selector;
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod bbc;
pub mod cnn;
pub mod hackernews;
pub mod verge;

const TITLE_PROBE: Probe = Probe::Attr(r#"meta[property="og:title"]"#, "content");
const DATE_PROBE: Probe = Probe::Attr(r#"meta[property="article:published_time"]"#, "content");
const SITE_NAME_PROBE: Probe = Probe::Attr(r#"meta[property="og:site_name"]"#, "content");

/// Everything that distinguishes one selector-driven site from another.
#[derive(Debug, Clone, Copy)]
pub struct SiteProfile {
    /// Display name used in logs.
    pub name: &'static str,
    pub homepage: &'static str,
    /// Selector for article anchors on the homepage.
    pub link_selector: &'static str,
    /// Hrefs containing any of these are skipped.
    pub excluded: &'static [&'static str],
    pub author_probe: Probe,
    pub default_author: &'static str,
    pub default_source: &'static str,
}

/// Run all fixed-site scrapers concurrently and concatenate in site order.
#[instrument(level = "info", skip_all)]
pub async fn scrape_default_sites<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Vec<Article> {
    let (bbc, verge, cnn, hackernews) = tokio::join!(
        bbc::scrape(fetcher, config),
        verge::scrape(fetcher, config),
        cnn::scrape(fetcher, config),
        hackernews::scrape(fetcher, config),
    );

    info!(
        bbc_count = bbc.len(),
        verge_count = verge.len(),
        cnn_count = cnn.len(),
        hackernews_count = hackernews.len(),
        "Scraped default sites"
    );

    [bbc, verge, cnn, hackernews].into_iter().flatten().collect()
}

/// Index a profile's homepage and fetch up to `site_article_cap` articles.
#[instrument(level = "info", skip_all, fields(site = profile.name))]
pub async fn scrape_site<F: Fetch>(
    fetcher: &F,
    profile: &SiteProfile,
    config: &ScraperConfig,
) -> Vec<Article> {
    let urls = match index_articles(fetcher, profile, config).await {
        Ok(urls) => urls,
        Err(e) => {
            error!(error = %e, homepage = profile.homepage, "Homepage fetch failed; skipping site");
            return Vec::new();
        }
    };
    fetch_articles(fetcher, profile, urls, config).await
}

/// Fetch the homepage and collect article URLs.
pub async fn index_articles<F: Fetch>(
    fetcher: &F,
    profile: &SiteProfile,
    config: &ScraperConfig,
) -> Result<Vec<String>, FetchError> {
    let html = fetcher
        .fetch(profile.homepage, config.homepage_timeout())
        .await?;
    let urls = collect_links(&html, profile, config.site_article_cap);
    info!(
        count = urls.len(),
        source = profile.homepage,
        "Indexed article URLs"
    );
    debug!(urls = ?urls, "Indexed URLs");
    Ok(urls)
}

/// Unique absolute article URLs in homepage order, at most `cap`.
pub fn collect_links(html: &str, profile: &SiteProfile, cap: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse(profile.link_selector) else {
        error!(selector = profile.link_selector, "Invalid link selector");
        return Vec::new();
    };
    let Ok(base) = Url::parse(profile.homepage) else {
        return Vec::new();
    };
    let doc = Document::parse(html);
    doc.select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter(|href| !profile.excluded.iter().any(|m| href.contains(m)))
        .filter_map(|href| resolve_href(&base, href))
        .unique()
        .take(cap)
        .collect()
}

/// Fetch articles one after another, keeping index order.
#[instrument(level = "info", skip_all, fields(site = profile.name))]
pub async fn fetch_articles<F: Fetch>(
    fetcher: &F,
    profile: &SiteProfile,
    urls: Vec<String>,
    config: &ScraperConfig,
) -> Vec<Article> {
    let articles: Vec<Article> = stream::iter(urls)
        .then(|url: String| async move {
            match fetcher.fetch(&url, config.article_timeout()).await {
                Ok(body) => {
                    debug!(%url, "Fetched article");
                    Some(read_article(&body, &url, profile))
                }
                Err(e) => {
                    error!(error = %e, %url, site = profile.name, "Article fetch failed");
                    None
                }
            }
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = articles.len(), site = profile.name, "Fetched article metadata");
    articles
}

/// Read the known meta tags of one article page.
pub fn read_article(html: &str, link: &str, profile: &SiteProfile) -> Article {
    let doc = Document::parse(html);
    Article {
        title: TITLE_PROBE.read(&doc).unwrap_or_else(|| "No title".to_string()),
        link: link.to_string(),
        author: profile
            .author_probe
            .read(&doc)
            .unwrap_or_else(|| profile.default_author.to_string()),
        publication_date: DATE_PROBE.read(&doc).unwrap_or_else(|| UNKNOWN.to_string()),
        source: SITE_NAME_PROBE
            .read(&doc)
            .unwrap_or_else(|| profile.default_source.to_string()),
        error: None,
    }
}
