//! CNN scraper.
//!
//! Article URLs on [CNN](https://edition.cnn.com) are date-prefixed, e.g.
//! `/2026/10/19/world/article-slug`, so the homepage is indexed with
//! `a[href^="/202"]` and resolved against the edition host.

use super::{SiteProfile, scrape_site};
use crate::config::ScraperConfig;
use crate::extractor::Probe;
use crate::fetcher::Fetch;
use crate::models::Article;

pub const PROFILE: SiteProfile = SiteProfile {
    name: "CNN",
    homepage: "https://edition.cnn.com/",
    link_selector: r#"a[href^="/202"]"#,
    excluded: &[],
    author_probe: Probe::Attr(r#"meta[name="author"]"#, "content"),
    default_author: "CNN",
    default_source: "CNN",
};

pub async fn scrape<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Vec<Article> {
    scrape_site(fetcher, &PROFILE, config).await
}
