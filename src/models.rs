//! Data models for scraped articles and scrape requests.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One normalized article record, as returned to callers
//! - [`Candidate`]: A discovered link waiting to be visited
//! - [`ExtractionRequest`]: A validated caller request
//! - [`SortBy`]: The requested ordering of the result list
//!
//! Articles serialize with camelCase field names (`publicationDate`) to match
//! the JSON shape served by `/api/news`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Placeholder used for any field no extraction source could fill.
pub const UNKNOWN: &str = "Unknown";

/// A normalized news article.
///
/// Every article handed back to a caller has a non-empty `title` and an
/// absolute `link`. `publicationDate` is kept exactly as found on the page;
/// it is only interpreted when sorting by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Byline, or `"Unknown"`.
    pub author: String,
    /// Raw publication date string, or `"Unknown"`.
    pub publication_date: String,
    /// Site display name or hostname.
    pub source: String,
    /// Set only on synthetic records describing an unreachable target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Article {
    /// Record produced when the article page itself could not be loaded.
    ///
    /// Falls back to the anchor text for the title and the site name for the
    /// source; author and date are always `"Unknown"`.
    pub fn degraded(link: &str, anchor_text: &str, site_name: &str) -> Self {
        let title = if anchor_text.trim().is_empty() {
            "Unable to load article".to_string()
        } else {
            anchor_text.trim().to_string()
        };
        let source = if site_name.trim().is_empty() {
            UNKNOWN.to_string()
        } else {
            site_name.trim().to_string()
        };
        Self {
            title,
            link: link.to_string(),
            author: UNKNOWN.to_string(),
            publication_date: UNKNOWN.to_string(),
            source,
            error: None,
        }
    }

    /// Synthetic record standing in for a target whose homepage could not be fetched.
    pub fn unreachable(url: &str, error: impl Into<String>) -> Self {
        Self {
            title: format!("Unable to scrape {url}"),
            link: url.to_string(),
            author: "System".to_string(),
            publication_date: Utc::now().to_rfc3339(),
            source: "Error".to_string(),
            error: Some(error.into()),
        }
    }

    /// Whether this record describes a failure rather than a real article.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A discovered article link and the visible text of its anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub url: String,
    pub anchor_text: String,
}

/// Requested ordering of the result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep discovery / site order.
    #[default]
    Default,
    /// Newest first; unparseable dates last.
    Date,
    /// Titles containing the keyword first.
    Relevance,
}

impl SortBy {
    /// Lenient parse used at the HTTP boundary: anything unrecognised is `Default`.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => SortBy::Date,
            "relevance" => SortBy::Relevance,
            _ => SortBy::Default,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A homepage to run the generic pipeline against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: Url,
    /// The URL as the caller wrote it, echoed back in error records.
    pub input: String,
}

/// A validated scrape request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// `None` means the fixed sites.
    pub target: Option<Target>,
    /// Non-empty keyword, if any.
    pub keyword: Option<String>,
    pub sort_by: SortBy,
}

impl ExtractionRequest {
    /// Build a request from raw caller input.
    ///
    /// Blank strings are treated as absent. A present URL must be an absolute
    /// `http`/`https` URL with a host.
    pub fn new(
        target_url: Option<&str>,
        keyword: Option<&str>,
        sort_by: SortBy,
    ) -> Result<Self, RequestError> {
        let target = match target_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(Target {
                url: validate_url(raw)?,
                input: raw.to_string(),
            }),
            None => None,
        };
        let keyword = keyword
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Self {
            target,
            keyword,
            sort_by,
        })
    }
}

fn validate_url(raw: &str) -> Result<Url, RequestError> {
    let invalid = |reason: &str| RequestError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(url)
}
