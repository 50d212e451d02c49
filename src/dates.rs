//! Interpretation of free-form publication dates.
//!
//! Dates are stored exactly as scraped and only interpreted here, when a
//! caller asks for date ordering. Accepted forms:
//!
//! | Form | Example |
//! |------|---------|
//! | RFC 3339 / ISO-8601 with offset | `2026-10-19T08:30:00Z`, `2026-10-19T08:30:00+0200` |
//! | RFC 2822 | `Mon, 19 Oct 2026 08:30:00 GMT` |
//! | Naive ISO date-time (UTC) | `2026-10-19T08:30:00`, `2026-10-19 08:30` |
//! | Bare date (midnight UTC) | `2026-10-19`, `2026/10/19`, `October 19, 2026`, `19 Oct 2026` |
//! | Relative to now | `just now`, `today`, `yesterday`, `3 hours ago`, `an hour ago` |
//!
//! Relative months are 30 days and years 365 days.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

static RELATIVE_AGO: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+|an?)\s+(second|sec|minute|min|hour|hr|day|week|month|year)s?\s+ago$").ok()
});

/// Interpret `raw` as an instant, or `None` if it is not a recognised date.
pub fn parse_publication_date(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    parse_relative(s, now)
}

fn parse_relative(s: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match s.to_ascii_lowercase().as_str() {
        "just now" | "now" | "today" => return Some(now),
        "yesterday" => return Some(now - Duration::days(1)),
        _ => {}
    }

    let caps = (*RELATIVE_AGO).as_ref()?.captures(s)?;
    let amount: i64 = match caps[1].to_ascii_lowercase().as_str() {
        "a" | "an" => 1,
        n => n.parse().ok()?,
    };
    let unit = match caps[2].to_ascii_lowercase().as_str() {
        "second" | "sec" => Duration::seconds(1),
        "minute" | "min" => Duration::minutes(1),
        "hour" | "hr" => Duration::hours(1),
        "day" => Duration::days(1),
        "week" => Duration::weeks(1),
        "month" => Duration::days(30),
        "year" => Duration::days(365),
        _ => return None,
    };
    let offset = unit.checked_mul(i32::try_from(amount).ok()?)?;
    now.checked_sub_signed(offset)
}
