//! Per-article metadata extraction.
//!
//! Each field is filled from an ordered chain of [`Probe`]s, tried until one
//! yields a non-empty value. Structured metadata (OpenGraph, Twitter cards,
//! `article:*` meta tags) comes first, markup heuristics (headings, class
//! names, `<time>`) after, and finally the caller-supplied fallbacks.
//!
//! Extraction never fails: an article page that cannot be fetched produces a
//! degraded [`Article`] built only from the anchor text and site name.

use crate::document::Document;
use crate::fetcher::Fetch;
use crate::models::{Article, Candidate, UNKNOWN};
use crate::utils::truncate_for_log;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// One place a field value may be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Attribute of the first element matching the selector.
    Attr(&'static str, &'static str),
    /// Text of the first element matching the selector.
    Text(&'static str),
}

impl Probe {
    pub fn read(&self, doc: &Document) -> Option<String> {
        match *self {
            Probe::Attr(css, attr) => doc.first_attr(css, attr),
            Probe::Text(css) => doc.first_text(css),
        }
    }
}

pub const TITLE_PROBES: &[Probe] = &[
    Probe::Attr(r#"meta[property="og:title"]"#, "content"),
    Probe::Attr(r#"meta[name="twitter:title"]"#, "content"),
    Probe::Text("title"),
    Probe::Text("h1"),
];

pub const AUTHOR_PROBES: &[Probe] = &[
    Probe::Attr(r#"meta[name="author"]"#, "content"),
    Probe::Attr(r#"meta[property="article:author"]"#, "content"),
    Probe::Attr(r#"meta[name="byl"]"#, "content"),
    Probe::Text(".author"),
    Probe::Text(r#"[class*="author"]"#),
];

pub const DATE_PROBES: &[Probe] = &[
    Probe::Attr(r#"meta[property="article:published_time"]"#, "content"),
    Probe::Attr(r#"meta[name="publish-date"]"#, "content"),
    Probe::Attr(r#"meta[name="date"]"#, "content"),
    Probe::Attr("time", "datetime"),
    Probe::Text("time"),
    Probe::Text(".date"),
    Probe::Text(r#"[class*="date"]"#),
];

pub const SOURCE_PROBES: &[Probe] = &[Probe::Attr(r#"meta[property="og:site_name"]"#, "content")];

/// First non-empty value produced by `probes`, in order.
pub fn first_match(doc: &Document, probes: &[Probe]) -> Option<String> {
    probes.iter().find_map(|probe| probe.read(doc))
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build an [`Article`] from a fetched article page.
///
/// `anchor_text` and `site_name` are the fallbacks for title and source.
pub fn extract_article(html: &str, link: &str, anchor_text: &str, site_name: &str) -> Article {
    let doc = Document::parse(html);

    let title = first_match(&doc, TITLE_PROBES)
        .or_else(|| non_blank(anchor_text))
        .unwrap_or_else(|| "No title".to_string());
    let author = first_match(&doc, AUTHOR_PROBES).unwrap_or_else(|| UNKNOWN.to_string());
    let publication_date = first_match(&doc, DATE_PROBES).unwrap_or_else(|| UNKNOWN.to_string());
    let source = first_match(&doc, SOURCE_PROBES)
        .or_else(|| non_blank(site_name))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Article {
        title,
        link: link.to_string(),
        author,
        publication_date,
        source,
        error: None,
    }
}

/// Fetch one candidate and extract its metadata, degrading on any failure.
#[instrument(level = "info", skip_all, fields(url = %candidate.url))]
pub async fn fetch_article_details<F: Fetch>(
    fetcher: &F,
    candidate: &Candidate,
    site_name: &str,
    timeout: Duration,
) -> Article {
    match fetcher.fetch(&candidate.url, timeout).await {
        Ok(body) => {
            let article = extract_article(&body, &candidate.url, &candidate.anchor_text, site_name);
            debug!(
                title = %truncate_for_log(&article.title, 80),
                author = %article.author,
                date = %article.publication_date,
                "Extracted article metadata"
            );
            article
        }
        Err(e) => {
            warn!(error = %e, "Article fetch failed; using degraded record");
            Article::degraded(&candidate.url, &candidate.anchor_text, site_name)
        }
    }
}
