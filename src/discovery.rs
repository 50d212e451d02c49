//! Heuristic article-link discovery on arbitrary homepages.
//!
//! A homepage is scanned with an ordered table of selector strategies. Earlier
//! strategies are more article-specific (URL paths like `/news/`), later ones
//! are generic (any heading link). Anchors are deduplicated by URL and scanning
//! stops as soon as the discovery cap is reached, so when a page has plenty of
//! links the specific strategies win.

use crate::document::{Document, element_text};
use crate::models::Candidate;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::{debug, warn};
use url::Url;

/// Anchor text shorter than or equal to this is navigation, not a headline.
const MIN_ANCHOR_CHARS: usize = 10;
/// Anchor text at or above this is a teaser paragraph, not a headline.
const MAX_ANCHOR_CHARS: usize = 200;

/// Hrefs containing any of these are never articles.
const EXCLUDED_HREF_MARKERS: &[&str] = &[
    "#",
    "mailto:",
    "javascript:",
    "/tag/",
    "/category/",
    "/author/",
];

/// Selector strategies in priority order: `(css, optional href pattern)`.
const STRATEGY_TABLE: &[(&str, Option<&str>)] = &[
    (r#"a[href*="/article"]"#, None),
    (r#"a[href*="/news"]"#, None),
    (r#"a[href*="/story"]"#, None),
    (r#"a[href*="/post"]"#, None),
    (r#"a[href*="/blog"]"#, None),
    ("a[href]", Some(r"/(?:19|20)\d{2}(?:/|-|$)")),
    ("article a", None),
    (".article a", None),
    (".news a", None),
    (".post a", None),
    ("h1 a", None),
    ("h2 a", None),
    ("h3 a", None),
    (".headline a", None),
    (".title a", None),
    (r#"[class*="headline"] a"#, None),
    (r#"[class*="title"] a"#, None),
    (r#"[class*="article"] a"#, None),
    (r#"[class*="story"] a"#, None),
];

struct Strategy {
    selector: Selector,
    href_pattern: Option<Regex>,
}

impl Strategy {
    fn matches(&self, anchor: &ElementRef<'_>) -> bool {
        match (&self.href_pattern, anchor.value().attr("href")) {
            (None, _) => true,
            (Some(pattern), Some(href)) => pattern.is_match(href),
            (Some(_), None) => false,
        }
    }
}

static STRATEGIES: Lazy<Vec<Strategy>> = Lazy::new(|| {
    STRATEGY_TABLE
        .iter()
        .filter_map(|(css, pattern)| {
            let selector = match Selector::parse(css) {
                Ok(s) => s,
                Err(e) => {
                    warn!(%css, error = %e, "Skipping unparseable discovery selector");
                    return None;
                }
            };
            let href_pattern = match pattern.map(Regex::new).transpose() {
                Ok(p) => p,
                Err(e) => {
                    warn!(%css, error = %e, "Skipping discovery strategy with bad pattern");
                    return None;
                }
            };
            Some(Strategy {
                selector,
                href_pattern,
            })
        })
        .collect()
});

/// Discover up to `cap` candidate article links on a homepage.
///
/// `base` is the URL the homepage was fetched from; relative links are
/// resolved against its origin. The result is in strategy-then-document order
/// with no repeated URL.
pub fn discover_links(html: &str, base: &Url, cap: usize) -> Vec<Candidate> {
    let doc = Document::parse(html);
    let candidates: Vec<Candidate> = STRATEGIES
        .iter()
        .flat_map(|strategy| {
            doc.select(&strategy.selector)
                .filter(move |anchor| strategy.matches(anchor))
        })
        .filter_map(|anchor| qualify(anchor, base))
        .unique_by(|candidate| candidate.url.clone())
        .take(cap)
        .collect();

    debug!(
        base = %base,
        count = candidates.len(),
        cap,
        "Discovered candidate links"
    );
    candidates
}

/// Turn an anchor into a candidate if it looks like a headline link.
fn qualify(anchor: ElementRef<'_>, base: &Url) -> Option<Candidate> {
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let text = element_text(anchor);
    if !is_headline_length(&text) || has_excluded_marker(href) {
        return None;
    }
    let url = resolve_href(base, href)?;
    Some(Candidate {
        url,
        anchor_text: text,
    })
}

/// True iff the text is strictly between the headline length bounds.
pub fn is_headline_length(text: &str) -> bool {
    let len = text.chars().count();
    len > MIN_ANCHOR_CHARS && len < MAX_ANCHOR_CHARS
}

fn has_excluded_marker(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    EXCLUDED_HREF_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Resolve an href to an absolute URL string against `base`'s origin.
///
/// Absolute `http(s)` hrefs pass through, `//host/...` takes the base scheme,
/// `/path` is joined to the origin and anything else is joined to the origin
/// with a `/`. Returns `None` if the result is not a valid URL.
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let lower = href.to_ascii_lowercase();
    let full = if lower.starts_with("http://") || lower.starts_with("https://") {
        href.to_string()
    } else if href.starts_with("//") {
        format!("{}:{}", base.scheme(), href)
    } else {
        let origin = base.origin().ascii_serialization();
        if href.starts_with('/') {
            format!("{origin}{href}")
        } else {
            format!("{origin}/{href}")
        }
    };
    Url::parse(&full).ok().map(|_| full)
}
