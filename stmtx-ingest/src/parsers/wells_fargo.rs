//! Wells Fargo checking statement parser (text)
//!
//! Expected extracted-text section:
//!   Transaction history
//!   Date  Number Description                      Deposits/   Withdrawals/  Ending daily
//!                                                 Additions   Subtractions  balance
//!   1/5          Purchase authorized on 01/04 Coffee              4.25
//!                Shop S584004
//!   1/6          Mobile Deposit : Ref Number :101     500.00                  1,495.75
//!   Totals                                            $500.00     $4.25
//!
//! Amount tokens are read right to left; how many there are decides which of
//! debit, credit and balance they fill.

use rust_decimal::Decimal;
use stmtx_core::{Document, SignMode, TransactionRow, normalize_date, parse_amount};

use super::{ParseContext, StatementParser};
use crate::accumulator::{LineEvent, RowAccumulator};
use crate::patterns::{is_amount_token, is_column_heading, mentions_credit, slash_date_prefix_re};

const SECTION_HEADING: &str = "transaction history";
const SECTION_ENDS: [&str; 2] = ["totals", "ending balance"];

pub struct WellsFargoParser;

fn is_section_heading(line: &str) -> bool {
    line.to_lowercase().starts_with(SECTION_HEADING)
}

fn is_section_end(line: &str) -> bool {
    let lower = line.to_lowercase();
    SECTION_ENDS.iter().any(|end| lower.starts_with(end))
}

fn magnitude(token: &str) -> Option<Decimal> {
    parse_amount(token, SignMode::Inferred).map(|v| v.abs())
}

fn classify(line: &str, ctx: &ParseContext) -> LineEvent {
    if is_column_heading(line) {
        return LineEvent::Skip;
    }

    let Some(caps) = slash_date_prefix_re().captures(line) else {
        return LineEvent::Continuation(line.to_string());
    };
    let date = normalize_date(&caps[1], Some(ctx.statement_year));
    let rest = &line[caps.get(0).map_or(0, |m| m.end())..];

    let (amounts, words): (Vec<&str>, Vec<&str>) =
        rest.split_whitespace().partition(|t| is_amount_token(t));

    let row = TransactionRow::new(ctx.bank, words.join(" ")).with_date(date);
    let row = match amounts.as_slice() {
        [] => row,
        [amount] if mentions_credit(line) => row.with_credit(magnitude(amount)),
        [amount] => row.with_debit(magnitude(amount)),
        [credit, balance] => row
            .with_credit(magnitude(credit))
            .with_balance(parse_amount(balance, SignMode::Inferred)),
        [.., debit, credit, balance] => row
            .with_debit(magnitude(debit))
            .with_credit(magnitude(credit))
            .with_balance(parse_amount(balance, SignMode::Inferred)),
    };
    LineEvent::Row(row)
}

impl StatementParser for WellsFargoParser {
    fn name(&self) -> &'static str {
        "wells-fargo"
    }

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow> {
        let gated = doc.text_lines().any(is_section_heading);
        let mut in_section = !gated;

        let events = doc.text_lines().map(|line| {
            if gated && is_section_heading(line) {
                in_section = true;
                return LineEvent::Skip;
            }
            if is_section_end(line) {
                in_section = !gated;
                return LineEvent::Skip;
            }
            if !in_section {
                return LineEvent::Skip;
            }
            classify(line, ctx)
        });

        RowAccumulator::fold(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stmtx_core::BankTag;

    fn ctx() -> ParseContext {
        ParseContext {
            bank: BankTag::WellsFargo,
            statement_year: 2024,
        }
    }

    fn parse(text: &str) -> Vec<TransactionRow> {
        WellsFargoParser.parse(&Document::from_texts([text]).unwrap(), &ctx())
    }

    #[test]
    fn test_parse_transaction_history() {
        let text = r#"
WELLS FARGO Everyday Checking
Beginning balance on 1/1 $999.75
Transaction history
Date Number Description Deposits/ Additions Withdrawals/ Subtractions Ending daily balance
1/5 Purchase authorized on 01/04 Coffee 4.25
Shop S584004
1/6 Mobile Deposit : Ref Number :101 500.00
1/8 ATM Withdrawal 60.00
1/9 Online Transfer 12.00 30.00 1,435.75
Totals $500.00 $76.25
1/31 Not a transaction 1.00
"#;
        let rows = parse(text);
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(rows[0].description, "Purchase authorized on 01/04 Coffee Shop S584004");
        assert_eq!(rows[0].debit, Some(dec!(4.25)));
        assert_eq!(rows[0].credit, None);

        assert_eq!(rows[1].credit, Some(dec!(500.00)));
        assert_eq!(rows[1].debit, None);

        assert_eq!(rows[2].debit, Some(dec!(60.00)));

        assert_eq!(rows[3].debit, Some(dec!(12.00)));
        assert_eq!(rows[3].credit, Some(dec!(30.00)));
        assert_eq!(rows[3].balance, Some(dec!(1435.75)));
        assert_eq!(rows[3].description, "Online Transfer");
    }

    #[test]
    fn test_two_amounts_are_credit_and_balance() {
        let rows = parse("1/12 Zelle From J Smith 75.00 1,510.75");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].credit, Some(dec!(75.00)));
        assert_eq!(rows[0].balance, Some(dec!(1510.75)));
        assert_eq!(rows[0].debit, None);
    }

    #[test]
    fn test_dated_line_without_amounts() {
        let rows = parse("1/14 Recurring Payment authorized\non 01/13 Netflix.com");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Recurring Payment authorized on 01/13 Netflix.com");
        assert!(rows[0].debit.is_none() && rows[0].credit.is_none() && rows[0].balance.is_none());
    }

    #[test]
    fn test_sections_reopen() {
        let text = r#"
Transaction history
1/2 Fee 5.00
Ending balance on 1/31 100.00
Account summary 1/3 ignored 9.00
Transaction history (continued)
1/20 Card Purchase 7.00
"#;
        let rows = parse(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].description, "Card Purchase");
    }
}
