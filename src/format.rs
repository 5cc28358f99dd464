//! Display helpers shared by the page controllers

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Cover shown when a book has none
pub const DEFAULT_COVER_URL: &str = "assets/images/default-cover.svg";

/// Format a server date as `YYYY/M/D`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain dates.
/// Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%Y/%-m/%-d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Format an optional date, using `missing` when absent
pub fn format_date_or(raw: Option<&str>, missing: &str) -> String {
    match raw {
        Some(raw) if !raw.trim().is_empty() => format_date(raw),
        _ => missing.to_string(),
    }
}

/// Price with two decimals, e.g. `¥9.90`
pub fn format_price(price: Option<Decimal>) -> String {
    format!("¥{:.2}", price.unwrap_or_default())
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn cover_url(cover: Option<&str>) -> &str {
    match cover {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_COVER_URL,
    }
}
