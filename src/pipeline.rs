//! Request orchestration: generic pipeline or fixed sites, then aggregation.
//!
//! # Generic pipeline
//!
//! 1. **Homepage**: fetch the target URL (failure yields one error record)
//! 2. **Discovery**: rank and collect candidate links, capped
//! 3. **Extraction**: fetch candidates concurrently, bounded by the visit cap
//! 4. **Aggregation**: keyword filter, then sort
//!
//! Extraction results come back in candidate order whatever order the fetches
//! finish in.

use crate::aggregator;
use crate::config::ScraperConfig;
use crate::discovery::discover_links;
use crate::extractor::fetch_article_details;
use crate::fetcher::Fetch;
use crate::models::{Article, ExtractionRequest, Target};
use crate::scrapers;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{error, info, instrument};

/// Serve one request end to end. Never fails; problems become records.
#[instrument(level = "info", skip_all, fields(target = ?request.target.as_ref().map(|t| t.input.as_str())))]
pub async fn scrape_news<F: Fetch>(
    fetcher: &F,
    config: &ScraperConfig,
    request: &ExtractionRequest,
) -> Vec<Article> {
    let t0 = Instant::now();
    let articles = match &request.target {
        Some(target) => scrape_dynamic_site(fetcher, config, target).await,
        None => scrapers::scrape_default_sites(fetcher, config).await,
    };
    let scraped = articles.len();
    let articles = aggregator::apply(articles, request.keyword.as_deref(), request.sort_by);

    info!(
        scraped,
        returned = articles.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Scrape request complete"
    );
    articles
}

/// Run discovery and extraction against an arbitrary homepage.
#[instrument(level = "info", skip_all, fields(url = %target.url))]
pub async fn scrape_dynamic_site<F: Fetch>(
    fetcher: &F,
    config: &ScraperConfig,
    target: &Target,
) -> Vec<Article> {
    let url = &target.url;
    let homepage = match fetcher.fetch(url.as_str(), config.homepage_timeout()).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Homepage fetch failed");
            return vec![Article::unreachable(&target.input, e.to_string())];
        }
    };

    let site_name = url.host_str().unwrap_or_default().to_string();
    let mut candidates = discover_links(&homepage, url, config.discovery_cap);
    let visit_cap = config.effective_visit_cap();
    candidates.truncate(visit_cap);
    info!(candidates = candidates.len(), %site_name, "Visiting candidate articles");

    let site_name = site_name.as_str();
    let timeout = config.article_timeout();
    stream::iter(candidates)
        .map(|candidate| async move {
            fetch_article_details(fetcher, &candidate, site_name, timeout).await
        })
        .buffered(visit_cap)
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;
    use crate::fetcher::testing::FakeFetcher;
    use crate::models::{SortBy, UNKNOWN};
    use crate::scrapers::{bbc, cnn, hackernews, verge};
    use std::time::Duration;

    fn request(url: Option<&str>, keyword: Option<&str>, sort_by: SortBy) -> ExtractionRequest {
        ExtractionRequest::new(url, keyword, sort_by).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_target_scenario() {
        let fetcher = FakeFetcher::new();
        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(Some("https://bad.example"), None, SortBy::Default),
        )
        .await;

        assert_eq!(articles.len(), 1);
        let a = &articles[0];
        assert_eq!(a.title, "Unable to scrape https://bad.example");
        assert_eq!(a.link, "https://bad.example");
        assert_eq!(a.author, "System");
        assert_eq!(a.source, "Error");
        assert_eq!(a.error.as_deref(), Some("network error: connection refused"));
    }

    #[tokio::test]
    async fn test_unreachable_target_echoes_url_as_given() {
        let articles = scrape_news(
            &FakeFetcher::new(),
            &ScraperConfig::default(),
            &request(Some("https://Bad.Example/"), None, SortBy::Default),
        )
        .await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Unable to scrape https://Bad.Example/");
        assert_eq!(articles[0].link, "https://Bad.Example/");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_early_candidates_keep_their_place() {
        let homepage: String = (0..4)
            .map(|i| format!(r#"<a href="/news/story-{i}">Headline number {i} for the day</a>"#))
            .collect();
        let mut fetcher = FakeFetcher::new().with_page("https://example.com/", &homepage);
        for i in 0..4u64 {
            let link = format!("https://example.com/news/story-{i}");
            fetcher = fetcher
                .with_page(&link, &format!("<title>Story {i}</title>"))
                // first candidate finishes last
                .with_delay(&link, Duration::from_millis(400 - 100 * i));
        }

        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(Some("https://example.com"), None, SortBy::Default),
        )
        .await;

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 0", "Story 1", "Story 2", "Story 3"]);
    }

    #[tokio::test]
    async fn test_reachable_but_empty_is_empty_list() {
        let fetcher = FakeFetcher::new().with_page("https://quiet.example/", "<p>nothing</p>");
        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(Some("https://quiet.example"), None, SortBy::Default),
        )
        .await;
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_dynamic_site_visits_at_most_cap_in_order() {
        let mut homepage = String::new();
        for i in 0..12 {
            homepage.push_str(&format!(
                r#"<a href="/news/story-{i}">Headline number {i} for the day</a>"#
            ));
        }
        let mut fetcher = FakeFetcher::new().with_page("https://example.com/", &homepage);
        // even-numbered articles load, odd ones fail and degrade
        for i in (0..12).step_by(2) {
            fetcher = fetcher.with_page(
                &format!("https://example.com/news/story-{i}"),
                &format!(
                    r#"<meta property="og:title" content="Full title {i}"><meta name="author" content="Writer {i}">"#
                ),
            );
        }
        fetcher = fetcher.with_error("https://example.com/news/story-1", FetchError::Timeout);

        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(Some("https://example.com"), None, SortBy::Default),
        )
        .await;

        assert_eq!(articles.len(), 8);
        let links: Vec<String> = articles.iter().map(|a| a.link.clone()).collect();
        let expected: Vec<String> = (0..8)
            .map(|i| format!("https://example.com/news/story-{i}"))
            .collect();
        assert_eq!(links, expected);

        assert_eq!(articles[0].title, "Full title 0");
        assert_eq!(articles[0].author, "Writer 0");
        assert_eq!(articles[0].source, "example.com");
        assert_eq!(articles[1].title, "Headline number 1 for the day");
        assert_eq!(articles[1].author, UNKNOWN);
        assert_eq!(articles[1].publication_date, UNKNOWN);
        assert_eq!(articles[1].source, "example.com");

        // homepage + 8 visits, nothing beyond the visit cap
        assert_eq!(fetcher.requested().len(), 9);
    }

    #[tokio::test]
    async fn test_keyword_and_relevance_applied_to_dynamic_results() {
        let homepage = r#"
            <a href="/news/a">Parliament debates new budget</a>
            <a href="/news/b">Mars sample return delayed again</a>"#;
        let fetcher = FakeFetcher::new()
            .with_page("https://example.com/", homepage)
            .with_page(
                "https://example.com/news/a",
                r#"<meta property="og:title" content="Budget debate"><meta name="author" content="Mars Jones">"#,
            )
            .with_page(
                "https://example.com/news/b",
                r#"<meta property="og:title" content="Mars sample return delayed">"#,
            );
        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(Some("https://example.com"), Some("mars"), SortBy::Relevance),
        )
        .await;
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Mars sample return delayed", "Budget debate"]);
    }

    fn profile_pages(fetcher: FakeFetcher, homepage: &str, links: &[String]) -> FakeFetcher {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<a class="gs-c-promo-heading" data-analytics-link="article" href="{l}">x</a>"#))
            .collect();
        let mut fetcher = fetcher.with_page(homepage, &anchors);
        for l in links {
            fetcher = fetcher.with_page(l, r#"<meta property="og:title" content="A headline">"#);
        }
        fetcher
    }

    #[tokio::test]
    async fn test_default_sites_scenario() {
        let bbc_links: Vec<String> = (0..7)
            .map(|i| format!("https://www.bbc.com/news/world-{i}"))
            .collect();
        let verge_links: Vec<String> = (0..3)
            .map(|i| format!("https://www.theverge.com/2026/10/19/{i}"))
            .collect();
        let cnn_homepage: String = (0..6)
            .map(|i| format!(r#"<a href="/2026/10/19/world/{i}">x</a>"#))
            .collect();
        let hn_rows: String = (0..9)
            .map(|i| {
                format!(
                    r#"<tr class="athing"><td><span class="titleline"><a href="https://hn{i}.example/">HN story {i}</a></span></td></tr><tr><td class="subtext"><a class="hnuser">u{i}</a><span class="age">{i} hours ago</span></td></tr>"#
                )
            })
            .collect();

        let mut fetcher = FakeFetcher::new();
        fetcher = profile_pages(fetcher, bbc::PROFILE.homepage, &bbc_links);
        fetcher = profile_pages(fetcher, verge::PROFILE.homepage, &verge_links);
        fetcher = fetcher.with_page(cnn::PROFILE.homepage, &cnn_homepage);
        for i in 0..6 {
            fetcher = fetcher.with_page(
                &format!("https://edition.cnn.com/2026/10/19/world/{i}"),
                r#"<meta property="og:title" content="CNN story">"#,
            );
        }
        fetcher = fetcher.with_page(hackernews::HOMEPAGE, &format!("<table>{hn_rows}</table>"));

        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(None, None, SortBy::Default),
        )
        .await;

        let sources: Vec<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        let mut expected = vec!["BBC News"; 5];
        expected.extend(vec!["The Verge"; 3]);
        expected.extend(vec!["CNN"; 5]);
        expected.extend([
            "hn0.example",
            "hn1.example",
            "hn2.example",
            "hn3.example",
            "hn4.example",
        ]);
        assert_eq!(sources, expected);
        assert!(articles.len() <= 20);
        assert!(articles.iter().all(|a| !a.title.is_empty() && !a.link.is_empty()));
    }

    #[tokio::test]
    async fn test_default_sites_survive_one_site_failing() {
        let fetcher = profile_pages(
            FakeFetcher::new(),
            verge::PROFILE.homepage,
            &["https://www.theverge.com/a".to_string()],
        );
        let articles = scrape_news(
            &fetcher,
            &ScraperConfig::default(),
            &request(None, None, SortBy::Default),
        )
        .await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "The Verge");
    }
}
