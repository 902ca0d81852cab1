//! Chase checking statement parser (text)
//!
//! Expected extracted-text section:
//!   TRANSACTION DETAIL
//!          DATE        DESCRIPTION                                     AMOUNT     BALANCE
//!                      Beginning Balance                                          $68.70
//!          04/22       Discover     E-Payment 8148   Web ID: ...       -15.00      53.70
//!                      Ending Balance                                             $53.70
//!
//! When the document has no TRANSACTION DETAIL heading every line is read.

use stmtx_core::{Document, SignMode, TransactionRow, normalize_date, parse_amount};

use super::{ParseContext, StatementParser};
use crate::accumulator::{LineEvent, RowAccumulator};
use crate::patterns::{balance_summary_re, checking_line_re, is_column_heading};

const SECTION_HEADING: &str = "TRANSACTION DETAIL";

pub struct ChaseCheckingParser;

fn classify(line: &str, ctx: &ParseContext) -> LineEvent {
    if is_column_heading(line) {
        return LineEvent::Skip;
    }

    if let Some(caps) = balance_summary_re().captures(line) {
        let row = TransactionRow::new(ctx.bank, caps["label"].trim())
            .with_balance(parse_amount(&caps["amount"], SignMode::Inferred));
        return LineEvent::Row(row);
    }

    let Some(caps) = checking_line_re().captures(line) else {
        return LineEvent::Continuation(line.to_string());
    };

    let mut row = TransactionRow::new(ctx.bank, caps["desc"].trim())
        .with_date(normalize_date(&caps["date"], Some(ctx.statement_year)))
        .with_balance(parse_amount(&caps["balance"], SignMode::Inferred));
    if let Some(amount) = parse_amount(&caps["amount"], SignMode::Inferred) {
        row = row.with_signed_amount(amount);
    }
    LineEvent::Row(row)
}

impl StatementParser for ChaseCheckingParser {
    fn name(&self) -> &'static str {
        "chase-checking"
    }

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow> {
        let gated = doc
            .text_lines()
            .any(|l| l.to_uppercase().starts_with(SECTION_HEADING));
        let mut in_section = !gated;

        let events = doc.text_lines().map(|line| {
            if gated {
                if line.to_uppercase().starts_with(SECTION_HEADING) {
                    in_section = true;
                    return LineEvent::Skip;
                }
                if !in_section {
                    return LineEvent::Skip;
                }
            }

            let event = classify(line, ctx);
            if gated && line.to_lowercase().starts_with("ending balance") {
                in_section = false;
            }
            event
        });

        RowAccumulator::fold(events)
    }
}
