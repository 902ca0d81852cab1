//! Amount normalizer: statement strings to exact decimals.
//!
//! Handles `$`, thousands separators, whitespace, Unicode minus variants,
//! trailing minus, and accounting-style parentheses. Unparseable input is
//! `None`, never zero.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// How the sign of a parsed amount is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMode {
    /// Free-text parsers: any negative marker makes the value `-|v|`, and
    /// the caller splits debit/credit by sign.
    Inferred,
    /// Strict column parsers: the numeral is kept exactly as written and
    /// column placement decides debit vs credit.
    Exact,
}

const MINUS_VARIANTS: [char; 5] = ['\u{2212}', '\u{2012}', '\u{2013}', '\u{FE63}', '\u{FF0D}'];

fn first_decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-+]?(?:\d+(?:\.\d+)?|\.\d+)").expect("decimal regex"))
}

/// Parse with [`SignMode::Inferred`].
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    parse_amount(raw, SignMode::Inferred)
}

pub fn parse_amount(raw: &str, mode: SignMode) -> Option<Decimal> {
    let mut s: String = raw
        .chars()
        .map(|c| if MINUS_VARIANTS.contains(&c) { '-' } else { c })
        .filter(|c| !matches!(c, '$' | ',' | '€' | '£') && !c.is_whitespace())
        .collect();
    if s.is_empty() {
        return None;
    }

    let mut negations = 0u8;
    if s.starts_with("-(") {
        negations += 1;
        s.remove(0);
    }
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        negations += 1;
        s = s[1..s.len() - 1].to_string();
    }
    if s.len() >= 2 && s.ends_with('-') {
        negations += 1;
        s.pop();
    }

    let value = Decimal::from_str(&s).ok().or_else(|| {
        first_decimal_re()
            .find(&s)
            .and_then(|m| Decimal::from_str(m.as_str()).ok())
    })?;

    Some(match mode {
        SignMode::Inferred => {
            if negations > 0 || value < Decimal::ZERO {
                -value.abs()
            } else {
                value
            }
        }
        SignMode::Exact => {
            if negations % 2 == 1 {
                -value
            } else {
                value
            }
        }
    })
}

/// Split a signed amount into `(debit, credit)`: negative -> debit magnitude,
/// zero or positive -> credit.
pub fn split_signed(amount: Decimal) -> (Option<Decimal>, Option<Decimal>) {
    if amount < Decimal::ZERO {
        (Some(amount.abs()), None)
    } else {
        (None, Some(amount))
    }
}
