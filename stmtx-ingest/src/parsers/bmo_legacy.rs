//! BMO checking statement parser, older line-based layout (text)
//!
//! Expected extracted-text sections:
//!   Statement Period 02/01/24 TO 02/29/24
//!   Deposits and Other Credits
//!   Date      Amount     Description
//!   Feb 02    1,250.00   Payroll ACME CORP
//!   Total Deposits and Other Credits   1,250.00
//!   Withdrawals and Other Debits
//!   Feb 05       42.17   POS PURCHASE GROCER
//!                        #1182 CHICAGO IL
//!   Daily Balance Summary
//!   Feb 01    1,000.00   Feb 16    2,207.83
//!
//! The active section decides whether a row's amount is a debit or a credit.

use rust_decimal::Decimal;
use stmtx_core::{Document, SignMode, TransactionRow, month_from_name, normalize_date, parse_amount};

use super::{ParseContext, StatementParser};
use crate::accumulator::{LineEvent, RowAccumulator};
use crate::patterns::{is_column_heading, mentions_credit, month_amount_desc_re, month_amount_pair_re};

const DEPOSIT_HEADINGS: [&str; 4] = [
    "deposits",
    "deposits and credits",
    "deposits and other credits",
    "deposits and additions",
];
const WITHDRAWAL_HEADINGS: [&str; 6] = [
    "withdrawals",
    "withdrawals and debits",
    "withdrawals and other debits",
    "checks and other debits",
    "other debits",
    "debits",
];
const DAILY_BALANCE_HEADINGS: [&str; 3] = ["daily balance", "daily balances", "daily balance summary"];
const DAILY_BALANCE_LABEL: &str = "Daily Balance";
const MAX_BALANCE_PAIRS: usize = 2;

pub struct BmoLegacyParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    None,
    Deposits,
    Withdrawals,
    DailyBalance,
}

/// A heading is the whole line; wrapped description text that merely starts
/// with "Deposit" or "Debit" stays a continuation.
fn section_heading(line: &str) -> Option<Section> {
    let lower = line.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let name = lower.strip_suffix("(continued)").map_or(lower.as_str(), str::trim_end);
    if DAILY_BALANCE_HEADINGS.contains(&name) {
        Some(Section::DailyBalance)
    } else if DEPOSIT_HEADINGS.contains(&name) {
        Some(Section::Deposits)
    } else if WITHDRAWAL_HEADINGS.contains(&name) {
        Some(Section::Withdrawals)
    } else {
        None
    }
}

fn starts_with_month(date: &str) -> bool {
    date.split_whitespace()
        .next()
        .and_then(month_from_name)
        .is_some()
}

#[derive(Debug, Default)]
struct LegacyState {
    section: Section,
}

impl LegacyState {
    fn classify(&mut self, line: &str, ctx: &ParseContext) -> LineEvent {
        if let Some(section) = section_heading(line) {
            self.section = section;
            return LineEvent::Skip;
        }
        if line.to_lowercase().starts_with("total") || is_column_heading(line) {
            return LineEvent::Skip;
        }

        if self.section == Section::DailyBalance {
            let rows: Vec<TransactionRow> = month_amount_pair_re()
                .captures_iter(line)
                .filter(|c| starts_with_month(&c["date"]))
                .take(MAX_BALANCE_PAIRS)
                .map(|c| {
                    TransactionRow::new(ctx.bank, DAILY_BALANCE_LABEL)
                        .with_date(normalize_date(&c["date"], Some(ctx.statement_year)))
                        .with_balance(parse_amount(&c["amount"], SignMode::Inferred))
                })
                .collect();
            if !rows.is_empty() {
                return LineEvent::Rows(rows);
            }
        }

        let Some(caps) = month_amount_desc_re().captures(line) else {
            return LineEvent::Continuation(line.to_string());
        };
        if !starts_with_month(&caps["date"]) {
            return LineEvent::Continuation(line.to_string());
        }

        let desc = caps["desc"].trim();
        let amount = parse_amount(&caps["amount"], SignMode::Inferred).map(|v| v.abs());
        let row = TransactionRow::new(ctx.bank, desc)
            .with_date(normalize_date(&caps["date"], Some(ctx.statement_year)));
        LineEvent::Row(self.place(row, amount, desc))
    }

    fn place(&self, row: TransactionRow, amount: Option<Decimal>, desc: &str) -> TransactionRow {
        match self.section {
            Section::Deposits => row.with_credit(amount),
            Section::Withdrawals => row.with_debit(amount),
            Section::None | Section::DailyBalance if mentions_credit(desc) => row.with_credit(amount),
            Section::None | Section::DailyBalance => row.with_debit(amount),
        }
    }
}

impl StatementParser for BmoLegacyParser {
    fn name(&self) -> &'static str {
        "bmo-legacy"
    }

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow> {
        let mut state = LegacyState::default();
        RowAccumulator::fold(doc.text_lines().map(|line| state.classify(line, ctx)))
    }
}
