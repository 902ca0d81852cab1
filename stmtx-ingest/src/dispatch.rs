//! Bank tag to parser selection.

use serde::Serialize;
use stmtx_core::{BankTag, Document, TransactionRow};

use crate::parsers::{
    BmoLegacyParser, BmoStrictParser, ChaseCheckingParser, ChaseCreditParser, ParseContext,
    StatementParser, UniversalParser, WellsFargoParser,
};

/// Marker that switches BMO documents to the column-based parser.
pub const BMO_STRICT_MARKER: &str = "Monthly Activity Details";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParserKind {
    WellsFargo,
    ChaseCredit,
    ChaseChecking,
    BmoLegacy,
    BmoStrict,
    Universal,
}

impl ParserKind {
    fn parser(self) -> &'static dyn StatementParser {
        match self {
            ParserKind::WellsFargo => &WellsFargoParser,
            ParserKind::ChaseCredit => &ChaseCreditParser,
            ParserKind::ChaseChecking => &ChaseCheckingParser,
            ParserKind::BmoLegacy => &BmoLegacyParser,
            ParserKind::BmoStrict => &BmoStrictParser,
            ParserKind::Universal => &UniversalParser,
        }
    }

    pub fn name(self) -> &'static str {
        self.parser().name()
    }
}

pub fn select_parser(bank: BankTag, doc: &Document) -> ParserKind {
    match bank {
        BankTag::WellsFargo => ParserKind::WellsFargo,
        BankTag::ChaseCreditCard => ParserKind::ChaseCredit,
        BankTag::ChaseBank => ParserKind::ChaseChecking,
        BankTag::Bmo if doc.full_text().contains(BMO_STRICT_MARKER) => ParserKind::BmoStrict,
        BankTag::Bmo => ParserKind::BmoLegacy,
        BankTag::BankOfAmerica | BankTag::CreditCard | BankTag::Unknown => ParserKind::Universal,
    }
}

/// Run the parser chosen for `ctx.bank`. An empty result is returned as is.
pub fn dispatch(doc: &Document, ctx: &ParseContext) -> (ParserKind, Vec<TransactionRow>) {
    let kind = select_parser(ctx.bank, doc);
    (kind, kind.parser().parse(doc, ctx))
}
