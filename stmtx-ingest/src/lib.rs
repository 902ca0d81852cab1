//! stmtx-ingest: bank detection, layout reconstruction and per-bank statement parsers.
//!
//! [`parse_document`] is the whole pipeline for one document: detect the bank,
//! resolve the statement year, pick a parser, fold its line events into rows.

use std::path::Path;

use chrono::{Datelike, Local};
use serde::Serialize;
use stmtx_core::{Document, LayoutProvider, TransactionRow};
use tracing::{debug, info};

pub mod accumulator;
pub mod columns;
pub mod detect;
pub mod dispatch;
pub mod layout;
pub mod parsers;
pub mod patterns;
pub mod statement_info;

pub use detect::{DETECTION_RULES, detect_bank};
pub use dispatch::{ParserKind, dispatch, select_parser};
pub use parsers::{ParseContext, StatementParser};
pub use statement_info::{StatementInfo, StatementPeriod};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Year for yearless dates when the document names no statement period.
    /// `None` means the current year.
    pub fallback_year: Option<i32>,
}

impl ParseOptions {
    pub fn with_fallback_year(mut self, year: Option<i32>) -> Self {
        self.fallback_year = year;
        self
    }
}

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub info: StatementInfo,
    pub parser: ParserKind,
    pub rows: Vec<TransactionRow>,
}

/// Bank and header facts only, without running a parser.
pub fn inspect_document(doc: &Document, opts: &ParseOptions) -> StatementInfo {
    let bank = detect_bank(&doc.full_text());
    let fallback = opts.fallback_year.unwrap_or_else(|| Local::now().year());
    let info = statement_info::resolve(doc, bank, fallback);
    debug!(
        %bank,
        year = info.statement_year,
        from_period = info.period.is_some(),
        "statement year resolved"
    );
    info
}

pub fn parse_document(doc: &Document, opts: &ParseOptions) -> Statement {
    let info = inspect_document(doc, opts);
    let ctx = ParseContext {
        bank: info.bank,
        statement_year: info.statement_year,
    };
    let (parser, rows) = dispatch(doc, &ctx);
    info!(
        bank = %info.bank,
        parser = parser.name(),
        pages = doc.pages().len(),
        rows = rows.len(),
        "statement parsed"
    );

    Statement { info, parser, rows }
}

/// Load a layout dump through `provider` and parse it.
pub fn parse_path<P: LayoutProvider + ?Sized>(
    provider: &P,
    path: &Path,
    opts: &ParseOptions,
) -> stmtx_core::Result<Statement> {
    let doc = provider.load(path)?;
    Ok(parse_document(&doc, opts))
}
