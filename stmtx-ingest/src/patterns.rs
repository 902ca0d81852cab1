//! Line-shape grammar rules shared by the statement parsers.
//!
//! Each rule is a named function so it can be tested on its own. Regexes are
//! compiled once.

use std::sync::OnceLock;

use regex::Regex;

/// `M/D` or `MM/DD` (optionally `/YY[YY]`) at the start of a line.
pub fn slash_date_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}/\d{1,2}(?:/\d{2,4})?)(?:\s+|$)").expect("slash date prefix regex")
    })
}

/// `MM/DD <description> <signed amount>`, anchored at both ends.
pub fn card_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<date>\d{2}/\d{2})\s+(?P<desc>.+?)\s+(?P<amount>-?\$?[\d,]*\d\.\d{2})$")
            .expect("card line regex")
    })
}

/// `MM/DD <description> <signed amount> <balance>`.
pub fn checking_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<date>\d{2}/\d{2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>-?\$?[\d,]*\d\.\d{2})\s+",
            r"(?P<balance>-?\$?[\d,]*\d\.\d{2})$"
        ))
        .expect("checking line regex")
    })
}

/// `Beginning Balance $1,234.56` / `Ending Balance 53.70`.
pub fn balance_summary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?P<label>beginning balance|ending balance)\s+(?P<amount>-?\$?[\d,]*\d\.\d{2})$")
            .expect("balance summary regex")
    })
}

/// `<MM/DD | Mon DD> <description> <signed amount>` for unknown layouts.
pub fn universal_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<date>\d{2}/\d{2}|[A-Za-z]{3}\s+\d{1,2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>-?\$?[\d,]+\.\d{2})$"
        ))
        .expect("universal line regex")
    })
}

/// `Mon DD <amount> <description>` (BMO deposit/withdrawal rows).
pub fn month_amount_desc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<date>[A-Za-z]{3}\s+\d{1,2})\s+",
            r"(?P<amount>-?\$?[\d,]+\.\d{2})\s+",
            r"(?P<desc>.+)$"
        ))
        .expect("month amount description regex")
    })
}

/// One `Mon DD <amount>` pair; daily-balance lines hold up to two.
pub fn month_amount_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<date>[A-Za-z]{3}\s+\d{1,2})\s+(?P<amount>-?\$?[\d,]+\.\d{2})")
            .expect("month amount pair regex")
    })
}

fn amount_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\(?-?\$?\d[\d,]*\.\d{2}\)?-?$").expect("amount token regex")
    })
}

/// A whitespace-separated token that reads as money with cents.
pub fn is_amount_token(token: &str) -> bool {
    amount_token_re().is_match(token)
}

/// Table heading lines such as "Date Description Amount Balance".
pub fn is_column_heading(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    lower.starts_with("date")
        && ["description", "amount", "balance", "transaction"]
            .iter()
            .any(|k| lower.contains(k))
        && !line.split_whitespace().any(is_amount_token)
}

/// Keyword fallback for single-amount lines with no column to go by.
pub fn mentions_credit(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("deposit") || lower.contains("credit")
}
