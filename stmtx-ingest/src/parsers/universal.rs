//! Fallback parser for statements no specific parser claims.
//!
//! Lines are rebuilt from word positions when the page has them, otherwise
//! the page text is used as is. A row is `<MM/DD | Mon DD> <description>
//! <signed amount>`; the sign of the amount picks debit or credit.

use stmtx_core::{Document, Page, SignMode, TransactionRow, normalize_date, parse_amount};

use super::{ParseContext, StatementParser};
use crate::accumulator::{LineEvent, RowAccumulator};
use crate::layout::group_lines;
use crate::patterns::universal_line_re;

pub struct UniversalParser;

fn page_lines(page: &Page) -> Vec<String> {
    if page.words.is_empty() {
        page.text_lines().map(str::to_string).collect()
    } else {
        group_lines(&page.words).into_iter().map(|l| l.text).collect()
    }
}

fn classify(line: &str, ctx: &ParseContext) -> LineEvent {
    let Some(caps) = universal_line_re().captures(line) else {
        return LineEvent::Continuation(line.to_string());
    };

    let mut row = TransactionRow::new(ctx.bank, caps["desc"].trim())
        .with_date(normalize_date(&caps["date"], Some(ctx.statement_year)));
    if let Some(amount) = parse_amount(&caps["amount"], SignMode::Inferred) {
        row = row.with_signed_amount(amount);
    }
    LineEvent::Row(row)
}

impl StatementParser for UniversalParser {
    fn name(&self) -> &'static str {
        "universal"
    }

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow> {
        let events = doc
            .pages()
            .iter()
            .flat_map(page_lines)
            .map(|line| classify(&line, ctx));
        RowAccumulator::fold(events)
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
            bank: BankTag::Unknown,
            statement_year: 2023,
        }
    }

    #[test]
    fn test_text_lines() {
        let text = r#"
Some Credit Union
Date Description Amount
Mar 5 GROCERY STORE -22.10
#4411 SPRINGFIELD
03/07 REFUND 9.99
Thank you for banking with us
"#;
        let doc = Document::from_texts([text]).unwrap();
        let rows = UniversalParser.parse(&doc, &ctx());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2023, 3, 5));
        assert_eq!(rows[0].description, "GROCERY STORE #4411 SPRINGFIELD");
        assert_eq!(rows[0].debit, Some(dec!(22.10)));

        assert_eq!(rows[1].credit, Some(dec!(9.99)));
        assert_eq!(rows[1].description, "REFUND Thank you for banking with us");
    }

    #[test]
    fn test_heading_after_row_is_continuation() {
        let doc = Document::from_texts(["03/05 GROCERY STORE -22.10\nDate Description Amount\n03/06 X 1.00"])
            .unwrap();
        let rows = UniversalParser.parse(&doc, &ctx());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "GROCERY STORE Date Description Amount");
        assert_eq!(rows[0].debit, Some(dec!(22.10)));
        assert_eq!(rows[1].credit, Some(dec!(1.00)));
    }

    #[test]
    fn test_prefers_words_over_text() {
        let words = vec![
            PositionedWord::new("-4.00", 200.0, 230.0, 80.0),
            PositionedWord::new("03/09", 10.0, 40.0, 80.0),
            PositionedWord::new("PARKING", 60.0, 110.0, 80.0),
        ];
        let page = Page::new(1, "garbled text layer").with_words(words);
        let doc = Document::new(vec![page]).unwrap();
        let rows = UniversalParser.parse(&doc, &ctx());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "PARKING");
        assert_eq!(rows[0].debit, Some(dec!(4.00)));
    }
}
