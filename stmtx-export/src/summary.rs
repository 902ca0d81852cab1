//! Per-statement totals, printed after a parse.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stmtx_core::TransactionRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementSummary {
    pub total_rows: usize,
    pub credit_rows: usize,
    pub debit_rows: usize,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    /// Credits minus debits.
    pub net: Decimal,
    /// Date of the first dated row, in statement order.
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl StatementSummary {
    pub fn from_rows(rows: &[TransactionRow]) -> Self {
        let credits: Vec<Decimal> = rows.iter().filter_map(|r| r.credit).collect();
        let debits: Vec<Decimal> = rows.iter().filter_map(|r| r.debit).collect();
        let total_credits: Decimal = credits.iter().sum();
        let total_debits: Decimal = debits.iter().sum();

        Self {
            total_rows: rows.len(),
            credit_rows: credits.len(),
            debit_rows: debits.len(),
            total_credits,
            total_debits,
            net: total_credits - total_debits,
            first_date: rows.iter().find_map(|r| r.date),
            last_date: rows.iter().rev().find_map(|r| r.date),
        }
    }
}

impl fmt::Display for StatementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = match (self.first_date, self.last_date) {
            (Some(a), Some(b)) => format!("{a} .. {b}"),
            _ => "no dated rows".to_string(),
        };
        write!(
            f,
            "{} rows ({} credits, {} debits) | credits ${:.2} | debits ${:.2} | net ${:.2} | {}",
            self.total_rows,
            self.credit_rows,
            self.debit_rows,
            self.total_credits,
            self.total_debits,
            self.net,
            span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stmtx_core::BankTag;

    fn rows() -> Vec<TransactionRow> {
        vec![
            TransactionRow::new(BankTag::Bmo, "Daily Balance").with_balance(Some(dec!(100))),
            TransactionRow::new(BankTag::Bmo, "Payroll")
                .with_date(NaiveDate::from_ymd_opt(2024, 2, 2))
                .with_credit(Some(dec!(1250.00))),
            TransactionRow::new(BankTag::Bmo, "Coffee")
                .with_date(NaiveDate::from_ymd_opt(2024, 2, 5))
                .with_debit(Some(dec!(4.50))),
            TransactionRow::new(BankTag::Bmo, "Fee").with_debit(Some(dec!(8.00))),
        ]
    }

    #[test]
    fn test_totals() {
        let s = StatementSummary::from_rows(&rows());
        assert_eq!(s.total_rows, 4);
        assert_eq!(s.credit_rows, 1);
        assert_eq!(s.debit_rows, 2);
        assert_eq!(s.total_credits, dec!(1250.00));
        assert_eq!(s.total_debits, dec!(12.50));
        assert_eq!(s.net, dec!(1237.50));
        assert_eq!(s.first_date, NaiveDate::from_ymd_opt(2024, 2, 2));
        assert_eq!(s.last_date, NaiveDate::from_ymd_opt(2024, 2, 5));
    }

    #[test]
    fn test_display() {
        let line = StatementSummary::from_rows(&rows()).to_string();
        assert!(line.starts_with("4 rows (1 credits, 2 debits)"));
        assert!(line.contains("net $1237.50"));
        assert!(line.ends_with("2024-02-02 .. 2024-02-05"));
    }

    #[test]
    fn test_empty() {
        let s = StatementSummary::from_rows(&[]);
        assert_eq!(s.net, Decimal::ZERO);
        assert!(s.to_string().ends_with("no dated rows"));
    }
}
