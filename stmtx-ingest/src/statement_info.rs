//! Document-level facts read from statement headers: period, year, account.
//!
//! The statement year is resolved once per document and handed to every
//! parser, since most row dates carry no year.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use stmtx_core::{BankTag, Document, normalize_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementInfo {
    pub bank: BankTag,
    pub period: Option<StatementPeriod>,
    /// Year applied to yearless row dates.
    pub statement_year: i32,
    pub account_number: Option<String>,
}

fn period_res() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        let numeric = r"\d{1,2}/\d{1,2}/\d{2,4}";
        let named = r"[A-Za-z]{3,9}\.?\s+\d{1,2},?\s+\d{4}";
        [
            // Statement Period 02/01/24 TO 02/29/24
            Regex::new(&format!(
                r"(?i)statement\s+period[:\s]*(?P<start>{numeric})\s*(?:to|through|thru|-)\s*(?P<end>{numeric})"
            ))
            .expect("statement period regex"),
            // Opening/Closing Date 02/04/24 - 03/03/24
            Regex::new(&format!(
                r"(?i)opening/closing\s+date[:\s]*(?P<start>{numeric})\s*-\s*(?P<end>{numeric})"
            ))
            .expect("opening/closing regex"),
            // January 5, 2024 through February 4, 2024
            Regex::new(&format!(
                r"(?i)(?P<start>{named})\s*(?:to|through|thru|-)\s*(?P<end>{named})"
            ))
            .expect("named period regex"),
        ]
    })
}

fn account_res() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"(?i)account\s+(?:number|#)\s*:?\s*(\d{4,12})").expect("account number regex"),
            Regex::new(r"(?i)acct\s*#?\s*:?\s*(\d{4,12})").expect("acct regex"),
            Regex::new(r"(?i)account\s*:?\s*(\d{4,12})").expect("account regex"),
        ]
    })
}

/// First statement period found in `text`, in rule order.
pub fn find_period(text: &str) -> Option<StatementPeriod> {
    period_res().iter().find_map(|re| {
        let caps = re.captures(text)?;
        let start = normalize_date(&caps["start"], None)?;
        let end = normalize_date(&caps["end"], None)?;
        Some(StatementPeriod { start, end })
    })
}

pub fn find_account_number(text: &str) -> Option<String> {
    account_res()
        .iter()
        .find_map(|re| re.captures(text).map(|c| c[1].to_string()))
}

/// Period from the first page if it has one, else anywhere in the document.
pub fn resolve_period(doc: &Document) -> Option<StatementPeriod> {
    find_period(&doc.first_page().text).or_else(|| find_period(&doc.full_text()))
}

/// Resolve everything once. The statement year is the period's opening year,
/// else `fallback_year`.
pub fn resolve(doc: &Document, bank: BankTag, fallback_year: i32) -> StatementInfo {
    let period = resolve_period(doc);
    let statement_year = period.map(|p| p.start.year()).unwrap_or(fallback_year);

    StatementInfo {
        bank,
        period,
        statement_year,
        account_number: find_account_number(&doc.full_text()),
    }
}
