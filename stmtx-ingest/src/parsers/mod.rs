//! Format-specific statement parsers.
//!
//! Every parser walks its document top to bottom, classifies each line into a
//! [`LineEvent`](crate::accumulator::LineEvent), and lets the shared
//! [`RowAccumulator`](crate::accumulator::RowAccumulator) fold them into rows.

use stmtx_core::{BankTag, Document, TransactionRow};

pub mod bmo_legacy;
pub mod bmo_strict;
pub mod chase_checking;
pub mod chase_credit;
pub mod universal;
pub mod wells_fargo;

pub use bmo_legacy::BmoLegacyParser;
pub use bmo_strict::BmoStrictParser;
pub use chase_checking::ChaseCheckingParser;
pub use chase_credit::ChaseCreditParser;
pub use universal::UniversalParser;
pub use wells_fargo::WellsFargoParser;

/// Per-document facts a parser needs besides the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub bank: BankTag,
    /// Year for row dates printed without one.
    pub statement_year: i32,
}

pub trait StatementParser {
    fn name(&self) -> &'static str;

    fn parse(&self, doc: &Document, ctx: &ParseContext) -> Vec<TransactionRow>;
}
