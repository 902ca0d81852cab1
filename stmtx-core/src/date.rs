//! Date normalizer: short statement date tokens to calendar dates.
//!
//! Accepted shapes:
//!   03/15, 3/5, 03/15/24, 03-15-2024, 2024-03-15
//!   Mar 15, Mar. 15, March 15, 2024, 15 Mar 2024
//!
//! Month-first unless the first number cannot be a month. Yearless tokens need
//! a statement year.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,4})[/.\-](\d{1,2})(?:[/.\-](\d{2,4}))?\b").expect("numeric date regex")
    })
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?\b")
            .expect("month-day regex")
    })
}

fn day_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2})\s+([a-z]{3,9})\.?(?:,?\s+(\d{4}))?\b").expect("day-month regex")
    })
}

/// Month number for "Mar", "mar.", "March", "Sept".
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim().trim_end_matches('.').to_lowercase();
    if name.len() < 3 || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if name == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|full| full.starts_with(&name))
        .map(|i| i as u32 + 1)
}

fn expand_year(raw: &str) -> Option<i32> {
    let y: i32 = raw.parse().ok()?;
    match raw.len() {
        2 => Some(2000 + y),
        4 => Some(y),
        _ => None,
    }
}

fn from_numeric(caps: &regex::Captures<'_>, year_hint: Option<i32>) -> Option<NaiveDate> {
    let first = &caps[1];
    let second: u32 = caps[2].parse().ok()?;
    let third = caps.get(3).map(|m| m.as_str());

    if first.len() == 4 {
        // 2024-03-15
        let year: i32 = first.parse().ok()?;
        let day: u32 = third?.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, second, day);
    }
    if first.len() > 2 {
        return None;
    }

    let a: u32 = first.parse().ok()?;
    let (month, day) = if a > 12 && second <= 12 { (second, a) } else { (a, second) };
    let year = match third {
        Some(y) => expand_year(y)?,
        None => year_hint?,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn from_named(month: &str, day: &str, year: Option<&str>, year_hint: Option<i32>) -> Option<NaiveDate> {
    let month = month_from_name(month)?;
    let day: u32 = day.parse().ok()?;
    let year = match year {
        Some(y) => expand_year(y)?,
        None => year_hint?,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date token, searching inside surrounding text if needed.
///
/// `year_hint` is the statement year, used only when the token has none.
pub fn normalize_date(raw: &str, year_hint: Option<i32>) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for caps in numeric_re().captures_iter(s) {
        if let Some(d) = from_numeric(&caps, year_hint) {
            return Some(d);
        }
    }

    for caps in month_day_re().captures_iter(s) {
        let year = caps.get(3).map(|m| m.as_str());
        if let Some(d) = from_named(&caps[1], &caps[2], year, year_hint) {
            return Some(d);
        }
    }

    for caps in day_month_re().captures_iter(s) {
        let year = caps.get(3).map(|m| m.as_str());
        if let Some(d) = from_named(&caps[2], &caps[1], year, year_hint) {
            return Some(d);
        }
    }

    None
}
