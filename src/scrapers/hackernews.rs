//! Hacker News scraper.
//!
//! The [Hacker News](https://news.ycombinator.com) front page is a table in
//! which each story is a `tr.athing` row followed by a row holding its
//! `.subtext` (submitter and age). Everything needed is on that one page, so
//! no article is fetched. The source of each story is the hostname it links to.

use crate::config::ScraperConfig;
use crate::document::{Document, element_text};
use crate::fetcher::Fetch;
use crate::models::{Article, UNKNOWN};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{error, info, instrument};
use url::Url;

pub const HOMEPAGE: &str = "https://news.ycombinator.com/";

struct RowSelectors {
    row: Selector,
    title_link: Selector,
    user: Selector,
    age: Selector,
}

static SELECTORS: Lazy<Option<RowSelectors>> = Lazy::new(|| {
    Some(RowSelectors {
        row: Selector::parse(".athing").ok()?,
        title_link: Selector::parse(".titleline > a").ok()?,
        user: Selector::parse(".subtext .hnuser").ok()?,
        age: Selector::parse(".subtext .age").ok()?,
    })
});

#[instrument(level = "info", skip_all)]
pub async fn scrape<F: Fetch>(fetcher: &F, config: &ScraperConfig) -> Vec<Article> {
    let html = match fetcher.fetch(HOMEPAGE, config.homepage_timeout()).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, homepage = HOMEPAGE, "Hacker News fetch failed; skipping site");
            return Vec::new();
        }
    };
    let articles = parse_front_page(&html, config.site_article_cap);
    info!(count = articles.len(), "Parsed Hacker News stories");
    articles
}

/// Read up to `cap` stories from the front page markup.
pub fn parse_front_page(html: &str, cap: usize) -> Vec<Article> {
    let (Some(selectors), Ok(base)) = ((*SELECTORS).as_ref(), Url::parse(HOMEPAGE)) else {
        return Vec::new();
    };
    let doc = Document::parse(html);
    doc.select(&selectors.row)
        .filter_map(|row| read_row(row, selectors, &base))
        .take(cap)
        .collect()
}

fn read_row(row: ElementRef<'_>, selectors: &RowSelectors, base: &Url) -> Option<Article> {
    let anchor = row.select(&selectors.title_link).next()?;
    let title = element_text(anchor);
    let href = anchor.value().attr("href")?.trim();
    if title.is_empty() || href.is_empty() {
        return None;
    }
    let link = base.join(href).ok()?;
    let source = link.host_str().unwrap_or(UNKNOWN).to_string();

    let subtext_row = row.next_siblings().find_map(ElementRef::wrap);
    let pick = |selector: &Selector| {
        subtext_row
            .and_then(|r| r.select(selector).next())
            .map(element_text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    Some(Article {
        title,
        link: link.to_string(),
        author: pick(&selectors.user),
        publication_date: pick(&selectors.age),
        source,
        error: None,
    })
}
