//! BMO checking statement parser, "Monthly Activity Details" layout (words)
//!
//! This layout prints a real table, so rows are read by column position
//! instead of by text shape:
//!   Date     Description                Withdrawals   Deposits     Balance
//!   Feb 02   Payroll ACME                              1,250.00    2,250.00
//!            CORP
//!   Feb 05   Coffee                           4.50                 2,245.50
//!
//! Column boundaries are inferred per page from the header words. Pages
//! without a complete header are skipped.

use stmtx_core::{Document, Page, SignMode, TransactionRow, normalize_date, parse_amount};
use tracing::debug;

use super::{ParseContext, StatementParser};
use crate::accumulator::{LineEvent, RowAccumulator};
use crate::columns::{ColumnCells, infer_columns};
use crate::layout::group_lines;

pub struct BmoStrictParser;

fn classify(cells: ColumnCells, ctx: &ParseContext) -> LineEvent {
    if cells.is_empty() {
        return LineEvent::Skip;
    }

    let withdrawal = parse_amount(&cells.withdrawal, SignMode::Exact);
    let deposit = parse_amount(&cells.deposit, SignMode::Exact);
    let balance = parse_amount(&cells.balance, SignMode::Exact);
    let has_amount = withdrawal.is_some() || deposit.is_some() || balance.is_some();

    if !cells.date.is_empty() || has_amount {
        let row = TransactionRow::new(ctx.bank, &cells.description)
            .with_date(normalize_date(&cells.date, Some(ctx.statement_year)))
            .with_debit(withdrawal)
            .with_credit(deposit)
            .with_balance(balance);
        return LineEvent::Row(row);
    }

    if cells.description.is_empty() {
        LineEvent::Skip
    } else {
        LineEvent::Continuation(cells.description)
    }
}

fn page_events(page: &Page, ctx: &ParseContext) -> Vec<LineEvent> {
    let lines = group_lines(&page.words);
    let Some((header_idx, layout)) = infer_columns(&lines, &page.words) else {
        debug!(page = page.number, "no column header; page skipped");
        return Vec::new();
    };

    lines[header_idx + 1..]
        .iter()
        .map(|line| classify(layout.assign(&line.words), ctx))
        .collect()
}

impl StatementParser for BmoStrictParser {
    fn name(&self) -> &'static str {
        "bmo-strict"
    }

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow> {
        RowAccumulator::fold(doc.pages().iter().flat_map(|page| page_events(page, ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stmtx_core::{BankTag, PositionedWord};

    fn ctx() -> ParseContext {
        ParseContext {
            bank: BankTag::Bmo,
            statement_year: 2024,
        }
    }

    fn w(text: &str, center: f64, top: f64) -> PositionedWord {
        PositionedWord::new(text, center - 5.0, center + 5.0, top)
    }

    fn activity_page() -> Page {
        let words = vec![
            w("Monthly", 20.0, 60.0),
            w("Activity", 60.0, 60.0),
            w("Details", 100.0, 60.0),
            w("Date", 20.0, 100.0),
            w("Description", 120.0, 100.0),
            w("Withdrawals", 260.0, 100.0),
            w("Deposits", 340.0, 100.0),
            w("Balance", 420.0, 100.0),
            w("Feb", 15.0, 120.0),
            w("02", 30.0, 120.0),
            w("Payroll", 100.0, 120.0),
            w("ACME", 130.0, 120.0),
            w("1,250.00", 340.0, 120.0),
            w("2,250.00", 420.0, 120.0),
            w("CORP", 110.0, 135.0),
            w("Feb", 15.0, 150.0),
            w("05", 30.0, 150.0),
            w("Coffee", 110.0, 150.0),
            w("4.50", 260.0, 150.0),
            w("2,245.50", 420.0, 150.0),
            w("Feb", 15.0, 165.0),
            w("31", 30.0, 165.0),
            w("Adjustment", 110.0, 165.0),
            w("(3.00)", 340.0, 165.0),
        ];
        Page::new(1, "Monthly Activity Details").with_words(words)
    }

    #[test]
    fn test_rows_by_column() {
        let doc = Document::new(vec![activity_page()]).unwrap();
        let rows = BmoStrictParser.parse(&doc, &ctx());
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 2, 2));
        assert_eq!(rows[0].description, "Payroll ACME CORP");
        assert_eq!(rows[0].credit, Some(dec!(1250.00)));
        assert_eq!(rows[0].debit, None);
        assert_eq!(rows[0].balance, Some(dec!(2250.00)));

        assert_eq!(rows[1].debit, Some(dec!(4.50)));
        assert_eq!(rows[1].balance, Some(dec!(2245.50)));

        // Feb 31 is not a date; the row survives without one.
        assert_eq!(rows[2].date, None);
        assert_eq!(rows[2].credit, Some(dec!(-3.00)));
    }

    #[test]
    fn test_page_without_header_is_skipped() {
        let stray = Page::new(2, "continued").with_words(vec![
            w("Feb", 15.0, 40.0),
            w("09", 30.0, 40.0),
            w("Fee", 110.0, 40.0),
            w("8.00", 260.0, 40.0),
        ]);
        let doc = Document::new(vec![activity_page(), stray]).unwrap();
        let rows = BmoStrictParser.parse(&doc, &ctx());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.description != "Fee"));
    }

    #[test]
    fn test_text_only_document_yields_nothing() {
        let doc = Document::from_texts(["Monthly Activity Details\nFeb 02 Payroll 1,250.00"]).unwrap();
        assert!(BmoStrictParser.parse(&doc, &ctx()).is_empty());
    }
}
