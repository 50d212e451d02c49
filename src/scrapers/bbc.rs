//! BBC News scraper.
//!
//! Headlines on the [BBC News](https://www.bbc.com/news) front page are
//! `a.gs-c-promo-heading` anchors. Live-blog links are skipped because their
//! pages carry no article metadata.

use super::{SiteProfile, scrape_site};
use crate::config::ScraperConfig;
use crate::extractor::Probe;
use crate::fetcher::Fetch;
use crate::models::Article;

pub const PROFILE: SiteProfile = SiteProfile {
    name: "BBC",
    homepage: "https://www.bbc.com/news",
    link_selector: "a.gs-c-promo-heading",
    excluded: &["/live/", "#"],
    author_probe: Probe::Attr(r#"meta[name="byl"]"#, "content"),
    default_author: "BBC News",
    default_source: "BBC News",
};

pub async fn scrape<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Vec<Article> {
    scrape_site(fetcher, &PROFILE, config).await
}
