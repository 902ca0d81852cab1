//! Chase credit-card statement parser (text)
//!
//! Expected extracted-text rows:
//!   03/10     STARBUCKS STORE #123 SEATTLE WA                 -4.50
//!   03/12     PAYCHECK DEPOSIT                              1,500.00
//!
//! The sign of the amount alone decides debit (negative) vs credit.

use stmtx_core::{Document, SignMode, TransactionRow, normalize_date, parse_amount};

use super::{ParseContext, StatementParser};
use crate::accumulator::{LineEvent, RowAccumulator};
use crate::patterns::card_line_re;

pub struct ChaseCreditParser;

fn classify(line: &str, ctx: &ParseContext) -> LineEvent {
    let Some(caps) = card_line_re().captures(line) else {
        return LineEvent::Continuation(line.to_string());
    };

    let mut row = TransactionRow::new(ctx.bank, caps["desc"].trim())
        .with_date(normalize_date(&caps["date"], Some(ctx.statement_year)));
    if let Some(amount) = parse_amount(&caps["amount"], SignMode::Inferred) {
        row = row.with_signed_amount(amount);
    }
    LineEvent::Row(row)
}

impl StatementParser for ChaseCreditParser {
    fn name(&self) -> &'static str {
        "chase-credit-card"
    }

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow> {
        RowAccumulator::fold(doc.text_lines().map(|line| classify(line, ctx)))
    }
}
