//! stmtx-core: statement data model, amount/date normalizers, and the layout provider boundary.

pub mod amount;
pub mod bank;
pub mod date;
pub mod document;
pub mod error;
pub mod provider;
pub mod row;

pub use amount::{SignMode, normalize_amount, parse_amount, split_signed};
pub use bank::BankTag;
pub use date::{month_from_name, normalize_date};
pub use document::{Document, Page, PositionedWord};
pub use error::{IngestError, Result};
pub use provider::{JsonLayoutProvider, LayoutProvider};
pub use row::TransactionRow;
