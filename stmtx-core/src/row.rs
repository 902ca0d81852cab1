use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::split_signed;
use crate::bank::BankTag;

/// Normalized output of every statement parser (bank-agnostic).
///
/// Field order is the output column order: date, description, debit, credit,
/// balance, bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
    pub bank: BankTag,
}

impl TransactionRow {
    /// Runs of whitespace in `description` collapse to single spaces.
    pub fn new(bank: BankTag, description: impl AsRef<str>) -> Self {
        Self {
            date: None,
            description: collapse_whitespace(description.as_ref()),
            debit: None,
            credit: None,
            balance: None,
            bank,
        }
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_debit(mut self, debit: Option<Decimal>) -> Self {
        self.debit = debit;
        self
    }

    pub fn with_credit(mut self, credit: Option<Decimal>) -> Self {
        self.credit = credit;
        self
    }

    pub fn with_balance(mut self, balance: Option<Decimal>) -> Self {
        self.balance = balance;
        self
    }

    /// Inferred-sign placement: negative goes to debit as a magnitude,
    /// anything else to credit.
    pub fn with_signed_amount(mut self, amount: Decimal) -> Self {
        let (debit, credit) = split_signed(amount);
        self.debit = debit;
        self.credit = credit;
        self
    }

    /// Append a wrapped line to the description, space-joined.
    pub fn extend_description(&mut self, text: &str) {
        let text = collapse_whitespace(text);
        if text.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(&text);
    }

    /// Summary lines like "Daily Balance" carry a balance and nothing else.
    pub fn is_balance_only(&self) -> bool {
        self.debit.is_none() && self.credit.is_none() && self.balance.is_some()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
