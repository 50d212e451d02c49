//! The Verge scraper.
//!
//! Story links on [The Verge](https://www.theverge.com) homepage are tagged
//! with `data-analytics-link="article"`.

use super::{SiteProfile, scrape_site};
use crate::config::ScraperConfig;
use crate::extractor::Probe;
use crate::fetcher::Fetch;
use crate::models::Article;

pub const PROFILE: SiteProfile = SiteProfile {
    name: "The Verge",
    homepage: "https://www.theverge.com/",
    link_selector: r#"a[data-analytics-link="article"]"#,
    excluded: &[],
    author_probe: Probe::Attr(r#"meta[name="author"]"#, "content"),
    default_author: "Unknown",
    default_source: "The Verge",
};

pub async fn scrape<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Vec<Article> {
    scrape_site(fetcher, &PROFILE, config).await
}
