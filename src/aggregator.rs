//! Keyword filtering and ordering of the combined article list.
//!
//! Filtering always happens before sorting, and every sort is stable so that
//! ties keep discovery (or site) order.

use crate::dates::parse_publication_date;
use crate::models::{Article, SortBy};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tracing::debug;

/// Apply the request's keyword filter and sort order.
pub fn apply(articles: Vec<Article>, keyword: Option<&str>, sort_by: SortBy) -> Vec<Article> {
    let before = articles.len();
    let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

    let mut articles = match keyword {
        Some(k) => filter_by_keyword(articles, k),
        None => articles,
    };

    match (sort_by, keyword) {
        (SortBy::Date, _) => sort_by_date(&mut articles, Utc::now()),
        (SortBy::Relevance, Some(k)) => sort_by_relevance(&mut articles, k),
        (SortBy::Relevance, None) | (SortBy::Default, _) => {}
    }

    debug!(before, after = articles.len(), ?sort_by, "Aggregated articles");
    articles
}

/// Keep articles whose title, author or source contains `keyword`, ignoring case.
pub fn filter_by_keyword(articles: Vec<Article>, keyword: &str) -> Vec<Article> {
    let needle = keyword.to_lowercase();
    articles
        .into_iter()
        .filter(|a| {
            contains_ci(&a.title, &needle)
                || contains_ci(&a.author, &needle)
                || contains_ci(&a.source, &needle)
        })
        .collect()
}

/// Newest first; articles without an interpretable date keep their order at the end.
pub fn sort_by_date(articles: &mut Vec<Article>, now: DateTime<Utc>) {
    let mut keyed: Vec<(Option<DateTime<Utc>>, Article)> = articles
        .drain(..)
        .map(|a| (parse_publication_date(&a.publication_date, now), a))
        .collect();
    keyed.sort_by_key(|(date, _)| (date.is_none(), Reverse(*date)));
    articles.extend(keyed.into_iter().map(|(_, a)| a));
}

/// Articles whose title mentions `keyword` first; otherwise order is preserved.
pub fn sort_by_relevance(articles: &mut [Article], keyword: &str) {
    let needle = keyword.to_lowercase();
    articles.sort_by_key(|a| !contains_ci(&a.title, &needle));
}

fn contains_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(title: &str, author: &str, source: &str, date: &str) -> Article {
        Article {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.replace(' ', "-")),
            author: author.to_string(),
            publication_date: date.to_string(),
            source: source.to_string(),
            error: None,
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_keyword_matches_title_author_source() {
        let list = vec![
            article("Mars rover lands", "A", "S", "Unknown"),
            article("Other", "Bruno MARSH", "S", "Unknown"),
            article("Other two", "A", "Mars Daily", "Unknown"),
            article("Nothing here", "A", "S", "Unknown"),
        ];
        let filtered = filter_by_keyword(list, "mars");
        assert_eq!(titles(&filtered), vec!["Mars rover lands", "Other", "Other two"]);
    }

    #[test]
    fn test_keyword_filter_is_idempotent() {
        let list = vec![
            article("Mars rover lands", "A", "S", "Unknown"),
            article("Venus flyby", "A", "S", "Unknown"),
            article("Red planet", "Mars Team", "S", "Unknown"),
        ];
        let once = filter_by_keyword(list, "Mars");
        let twice = filter_by_keyword(once.clone(), "Mars");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relevance_scenario() {
        let list = vec![
            article("Stocks fall sharply", "Mars Reporter", "S", "Unknown"),
            article("Mars mission launches", "A", "S", "Unknown"),
        ];
        let sorted = apply(list, Some("mars"), SortBy::Relevance);
        assert_eq!(titles(&sorted), vec!["Mars mission launches", "Stocks fall sharply"]);
    }

    #[test]
    fn test_relevance_is_stable() {
        let mut list = vec![
            article("one", "A", "S", "Unknown"),
            article("mars two", "A", "S", "Unknown"),
            article("three", "A", "S", "Unknown"),
            article("mars four", "A", "S", "Unknown"),
        ];
        sort_by_relevance(&mut list, "MARS");
        assert_eq!(titles(&list), vec!["mars two", "mars four", "one", "three"]);
    }

    #[test]
    fn test_relevance_without_keyword_keeps_order() {
        let list = vec![
            article("b", "A", "S", "2026-01-01"),
            article("a", "A", "S", "2026-02-01"),
        ];
        let sorted = apply(list.clone(), None, SortBy::Relevance);
        assert_eq!(sorted, list);
    }

    #[test]
    fn test_date_sort_newest_first_unparseable_last_stable() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut list = vec![
            article("unknown one", "A", "S", "Unknown"),
            article("old", "A", "S", "2026-01-01"),
            article("garbled", "A", "S", "not a date"),
            article("recent", "A", "S", "2 hours ago"),
            article("mid", "A", "S", "2026-06-15T10:00:00Z"),
            article("unknown two", "A", "S", "Unknown"),
        ];
        sort_by_date(&mut list, now);
        assert_eq!(
            titles(&list),
            vec!["recent", "mid", "old", "unknown one", "garbled", "unknown two"]
        );
    }

    #[test]
    fn test_default_keeps_order() {
        let list = vec![
            article("z", "A", "S", "2026-01-01"),
            article("a", "A", "S", "2026-09-01"),
        ];
        assert_eq!(apply(list.clone(), None, SortBy::Default), list);
    }

    #[test]
    fn test_filter_runs_before_sort() {
        let list = vec![
            article("Venus news", "A", "S", "2026-10-01"),
            article("Mars older", "A", "S", "2026-01-01"),
            article("Mars newer", "A", "S", "2026-05-01"),
        ];
        let result = apply(list, Some("mars"), SortBy::Date);
        assert_eq!(titles(&result), vec!["Mars newer", "Mars older"]);
    }

    #[test]
    fn test_blank_keyword_is_no_filter() {
        let list = vec![article("a", "A", "S", "Unknown")];
        assert_eq!(apply(list.clone(), Some("  "), SortBy::Default), list);
    }
}
