//! Row accumulator: the one continuation-merge policy every parser shares.
//!
//! Parsers only classify lines into [`LineEvent`]s. The accumulator folds the
//! events in order: new rows are appended, continuation text extends the last
//! row's description, and a continuation with no row before it is dropped.
//! Rows whose description is still empty at the end are removed.

use stmtx_core::TransactionRow;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// The line starts a transaction.
    Row(TransactionRow),
    /// One line producing several standalone rows (two-column balance tables).
    Rows(Vec<TransactionRow>),
    /// Wrapped text belonging to the previous row.
    Continuation(String),
    /// Headings, totals and other page furniture.
    Skip,
}

#[derive(Debug, Default)]
pub struct RowAccumulator {
    rows: Vec<TransactionRow>,
    orphaned: usize,
}

impl RowAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, event: LineEvent) -> Self {
        match event {
            LineEvent::Row(row) => self.rows.push(row),
            LineEvent::Rows(rows) => self.rows.extend(rows),
            LineEvent::Continuation(text) => match self.rows.last_mut() {
                Some(last) => last.extend_description(&text),
                None => self.orphaned += 1,
            },
            LineEvent::Skip => {}
        }
        self
    }

    pub fn finish(self) -> Vec<TransactionRow> {
        let before = self.rows.len();
        let rows: Vec<_> = self
            .rows
            .into_iter()
            .filter(|r| !r.description.trim().is_empty())
            .collect();
        trace!(
            rows = rows.len(),
            dropped_empty = before - rows.len(),
            orphaned_continuations = self.orphaned,
            "accumulator finished"
        );
        rows
    }

    /// Fold a whole event stream, top of document first.
    pub fn fold<I>(events: I) -> Vec<TransactionRow>
    where
        I: IntoIterator<Item = LineEvent>,
    {
        events
            .into_iter()
            .fold(Self::new(), Self::apply)
            .finish()
    }
}
