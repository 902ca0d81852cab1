//! Column-span inferencer for strict table layouts.
//!
//! Find the header line, take the center of each header word, and split the
//! page horizontally at the midpoints between neighboring centers. The first
//! and last spans run out to the page's observed extent.

use serde::Serialize;
use stmtx_core::PositionedWord;

use crate::layout::TextLine;

/// Keywords that must all appear in a header line.
pub const REQUIRED_HEADER_KEYWORDS: [&str; 4] = ["date", "withdraw", "deposit", "balance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnName {
    Date,
    Description,
    Withdrawal,
    Deposit,
    Balance,
}

/// Half-open horizontal interval `[left, right)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSpan {
    pub name: ColumnName,
    pub left: f64,
    pub right: f64,
}

/// Map one header word to a column by substring rule.
pub fn classify_header_word(text: &str) -> Option<ColumnName> {
    let t = text.to_lowercase();
    if t.contains("withdraw") || t.contains("debit") {
        Some(ColumnName::Withdrawal)
    } else if t.contains("deposit") || t.contains("credit") {
        Some(ColumnName::Deposit)
    } else if t.contains("balance") {
        Some(ColumnName::Balance)
    } else if t.contains("date") {
        Some(ColumnName::Date)
    } else if t.contains("descr") || t.contains("detail") || t.contains("transaction") {
        Some(ColumnName::Description)
    } else {
        None
    }
}

/// Bisect sorted centers into contiguous spans covering `[min_x, max_x]`.
pub fn spans_from_centers(centers: &[(ColumnName, f64)], min_x: f64, max_x: f64) -> Vec<ColumnSpan> {
    let mut sorted = centers.to_vec();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let last = sorted.len().saturating_sub(1);
    sorted
        .iter()
        .enumerate()
        .map(|(i, &(name, center))| {
            let left = if i == 0 {
                min_x.min(center)
            } else {
                (sorted[i - 1].1 + center) / 2.0
            };
            let right = if i == last {
                max_x.max(center)
            } else {
                (center + sorted[i + 1].1) / 2.0
            };
            ColumnSpan { name, left, right }
        })
        .collect()
}

/// Words of one line sorted into their columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnCells {
    pub date: String,
    pub description: String,
    pub withdrawal: String,
    pub deposit: String,
    pub balance: String,
}

impl ColumnCells {
    fn push(&mut self, column: ColumnName, text: &str) {
        let cell = match column {
            ColumnName::Date => &mut self.date,
            ColumnName::Description => &mut self.description,
            ColumnName::Withdrawal => &mut self.withdrawal,
            ColumnName::Deposit => &mut self.deposit,
            ColumnName::Balance => &mut self.balance,
        };
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(text.trim());
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.description.is_empty()
            && self.withdrawal.is_empty()
            && self.deposit.is_empty()
            && self.balance.is_empty()
    }
}

/// Named spans for one page, plus where the header sat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnLayout {
    pub spans: Vec<ColumnSpan>,
    pub header_top: f64,
}

impl ColumnLayout {
    /// Column whose span contains `x`. The last span is closed on the right.
    pub fn column_for(&self, x: f64) -> Option<ColumnName> {
        let last = self.spans.len().checked_sub(1)?;
        self.spans
            .iter()
            .enumerate()
            .find(|(i, s)| x >= s.left && (x < s.right || (*i == last && x <= s.right)))
            .map(|(_, s)| s.name)
    }

    /// Words with no containing span are dropped.
    pub fn assign(&self, words: &[PositionedWord]) -> ColumnCells {
        let mut cells = ColumnCells::default();
        for w in words {
            if let Some(col) = self.column_for(w.center()) {
                cells.push(col, &w.text);
            }
        }
        cells
    }
}

fn is_header_line(line: &TextLine) -> bool {
    let lower = line.text.to_lowercase();
    REQUIRED_HEADER_KEYWORDS.iter().all(|k| lower.contains(k))
}

fn header_centers(line: &TextLine) -> Option<Vec<(ColumnName, f64)>> {
    let mut centers: Vec<(ColumnName, f64)> = Vec::new();
    for w in &line.words {
        if let Some(col) = classify_header_word(&w.text) {
            if !centers.iter().any(|(c, _)| *c == col) {
                centers.push((col, w.center()));
            }
        }
    }

    let center_of = |name: ColumnName| centers.iter().find(|(c, _)| *c == name).map(|(_, x)| *x);
    let date = center_of(ColumnName::Date)?;
    let withdrawal = center_of(ColumnName::Withdrawal)?;
    center_of(ColumnName::Deposit)?;
    center_of(ColumnName::Balance)?;

    if center_of(ColumnName::Description).is_none() {
        centers.push((ColumnName::Description, (date + withdrawal) / 2.0));
    }
    Some(centers)
}

/// Locate the header among `lines` and build the page's column layout.
///
/// Returns the header's index in `lines` with the layout, or `None` when the
/// page has no complete header.
pub fn infer_columns(lines: &[TextLine], page_words: &[PositionedWord]) -> Option<(usize, ColumnLayout)> {
    let min_x = page_words.iter().map(|w| w.x0).fold(f64::INFINITY, f64::min);
    let max_x = page_words.iter().map(|w| w.x1).fold(f64::NEG_INFINITY, f64::max);

    lines.iter().enumerate().find_map(|(i, line)| {
        if !is_header_line(line) {
            return None;
        }
        let centers = header_centers(line)?;
        Some((
            i,
            ColumnLayout {
                spans: spans_from_centers(&centers, min_x, max_x),
                header_top: line.top,
            },
        ))
    })
}
