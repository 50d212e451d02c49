//! Queryable wrapper around a parsed HTML page.
//!
//! Parsing is lenient: html5ever recovers from any markup, so a garbage body
//! simply yields a document with nothing to find. `Html` is not `Send`, so a
//! [`Document`] must be built and consumed inside synchronous code and never
//! held across an `.await`.

use crate::utils::normalize_whitespace;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Iterate elements matching a precompiled selector, in document order.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Normalized text of the first element matching `css`, if non-empty.
    pub fn first_text(&self, css: &str) -> Option<String> {
        let selector = Selector::parse(css).ok()?;
        let element = self.html.select(&selector).next()?;
        non_empty(element_text(element))
    }

    /// Trimmed attribute of the first element matching `css`, if non-empty.
    pub fn first_attr(&self, css: &str, attr: &str) -> Option<String> {
        let selector = Selector::parse(css).ok()?;
        let element = self.html.select(&selector).next()?;
        element.value().attr(attr).and_then(|v| non_empty(normalize_whitespace(v)))
    }
}

/// Visible text of an element with runs of whitespace collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
