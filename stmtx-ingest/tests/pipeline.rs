use std::path::Path;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use stmtx_core::{BankTag, Document, JsonLayoutProvider, Page, PositionedWord};
use stmtx_ingest::{ParseOptions, ParserKind, parse_document};

fn opts() -> ParseOptions {
    ParseOptions::default().with_fallback_year(Some(2024))
}

fn text_doc(pages: &[&str]) -> Document {
    Document::from_texts(pages.iter().copied()).unwrap()
}

#[test]
fn test_chase_credit_card_statement() {
    let doc = text_doc(&[
        "CHASE\nCREDIT CARD STATEMENT\nOpening/Closing Date 02/11/24 - 03/10/24\nAccount Number: 4400123412341234",
        "ACCOUNT ACTIVITY\n03/10 STARBUCKS #123 -4.50\n03/12 PAYCHECK DEPOSIT 1500.00",
    ]);
    let stmt = parse_document(&doc, &ParseOptions::default());

    assert_eq!(stmt.info.bank, BankTag::ChaseCreditCard);
    assert_eq!(stmt.info.statement_year, 2024);
    assert_eq!(stmt.parser, ParserKind::ChaseCredit);
    assert_eq!(stmt.rows.len(), 2);

    let coffee = &stmt.rows[0];
    assert_eq!(coffee.date, NaiveDate::from_ymd_opt(2024, 3, 10));
    assert_eq!(coffee.description, "STARBUCKS #123");
    assert_eq!(coffee.debit, Some(dec!(4.50)));
    assert_eq!(coffee.credit, None);
    assert_eq!(coffee.balance, None);
    assert_eq!(coffee.bank, BankTag::ChaseCreditCard);

    let pay = &stmt.rows[1];
    assert_eq!(pay.date, NaiveDate::from_ymd_opt(2024, 3, 12));
    assert_eq!(pay.credit, Some(dec!(1500.00)));
    assert_eq!(pay.debit, None);
}

#[test]
fn test_bmo_legacy_uses_statement_period_year() {
    let doc = text_doc(&[r#"
BMO Harris Bank N.A.
Statement Period 12/01/22 TO 12/31/22
Deposits and Other Credits
Dec 02 800.00 Payroll ACME
Withdrawals and Other Debits
Dec 03 15.25 Card Purchase
Daily Balance Summary
Dec 01 100.00 Dec 02 900.00
"#]);
    let stmt = parse_document(&doc, &opts());

    assert_eq!(stmt.info.bank, BankTag::Bmo);
    assert_eq!(stmt.info.statement_year, 2022);
    assert_eq!(stmt.parser, ParserKind::BmoLegacy);
    assert_eq!(stmt.rows.len(), 4);
    assert_eq!(stmt.rows[0].date, NaiveDate::from_ymd_opt(2022, 12, 2));
    assert_eq!(stmt.rows[0].credit, Some(dec!(800.00)));
    assert_eq!(stmt.rows[1].debit, Some(dec!(15.25)));
    assert!(stmt.rows[2..].iter().all(|r| r.is_balance_only()));
}

#[test]
fn test_bmo_strict_from_word_positions() {
    let w = |text: &str, center: f64, top: f64| PositionedWord::new(text, center - 5.0, center + 5.0, top);
    let words = vec![
        w("Date", 20.0, 100.0),
        w("Withdrawals", 260.0, 100.0),
        w("Deposits", 340.0, 100.0),
        w("Balance", 420.0, 100.0),
        w("Mar", 15.0, 120.0),
        w("01", 30.0, 120.0),
        w("Transfer", 120.0, 120.0),
        w("50.00", 260.0, 120.0),
        w("950.00", 420.0, 120.0),
    ];
    let page = Page::new(1, "BMO\nMonthly Activity Details").with_words(words);
    let stmt = parse_document(&Document::new(vec![page]).unwrap(), &opts());

    assert_eq!(stmt.parser, ParserKind::BmoStrict);
    assert_eq!(stmt.rows.len(), 1);
    assert_eq!(stmt.rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(stmt.rows[0].description, "Transfer");
    assert_eq!(stmt.rows[0].debit, Some(dec!(50.00)));
    assert_eq!(stmt.rows[0].balance, Some(dec!(950.00)));
}

#[test]
fn test_wells_fargo_statement() {
    let doc = text_doc(&["WELLS FARGO\nTransaction history\n1/5 Coffee Shop 4.25\n1/6 Mobile Deposit 500.00\nTotals $500.00 $4.25"]);
    let stmt = parse_document(&doc, &opts());

    assert_eq!(stmt.info.bank, BankTag::WellsFargo);
    assert_eq!(stmt.rows.len(), 2);
    assert_eq!(stmt.rows[0].debit, Some(dec!(4.25)));
    assert_eq!(stmt.rows[1].credit, Some(dec!(500.00)));
    assert!(stmt.rows.iter().all(|r| r.bank == BankTag::WellsFargo));
}

#[test]
fn test_unknown_bank_falls_back_to_universal() {
    let doc = text_doc(&["Hometown Credit Union\nMar 5 GROCERY STORE -22.10\n03/07 REFUND 9.99"]);
    let stmt = parse_document(&doc, &opts());

    assert_eq!(stmt.info.bank, BankTag::Unknown);
    assert_eq!(stmt.parser, ParserKind::Universal);
    assert_eq!(stmt.rows.len(), 2);
    assert_eq!(stmt.rows[0].debit, Some(dec!(22.10)));
    assert_eq!(stmt.rows[1].credit, Some(dec!(9.99)));
}

#[test]
fn test_zero_rows_is_not_an_error() {
    let doc = text_doc(&["CREDIT CARD STATEMENT\nNo activity this period"]);
    let stmt = parse_document(&doc, &opts());
    assert_eq!(stmt.info.bank, BankTag::CreditCard);
    assert!(stmt.rows.is_empty());
}

#[test]
fn test_json_dump_round_trip_to_statement_json() {
    let dump = r#"{
        "pages": [
            {"number": 1, "text": "CHASE CREDIT CARD STATEMENT\n03/10 STARBUCKS #123 -4.50"}
        ]
    }"#;
    let doc = JsonLayoutProvider
        .parse_str(Path::new("dump.json"), dump)
        .unwrap();
    let stmt = parse_document(&doc, &opts());

    let json = serde_json::to_value(&stmt).unwrap();
    assert_eq!(json["info"]["bank"], "ChaseCreditCard");
    assert_eq!(json["parser"], "chase-credit");
    assert_eq!(json["rows"][0]["description"], "STARBUCKS #123");
    assert_eq!(json["rows"][0]["date"], "2024-03-10");
}
