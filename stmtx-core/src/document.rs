//! Page-level input as supplied by the layout provider.

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// One token with its horizontal extent and vertical baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
}

impl PositionedWord {
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
        }
    }

    /// Horizontal center, used to assign the word to a table column.
    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Visible text, one layout line per text line.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub words: Vec<PositionedWord>,
}

impl Page {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            words: Vec::new(),
        }
    }

    pub fn with_words(mut self, words: Vec<PositionedWord>) -> Self {
        self.words = words;
        self
    }

    /// Non-blank text lines, trimmed, top of page first.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// A whole statement: a non-empty, page-ordered list of pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// Validate provider output. Zero pages and non-finite or inverted word
    /// boxes are rejected; everything else is left to the parsers.
    pub fn new(pages: Vec<Page>) -> Result<Self> {
        if pages.is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        for page in &pages {
            for w in &page.words {
                if !(w.x0.is_finite() && w.x1.is_finite() && w.top.is_finite()) {
                    return Err(IngestError::MalformedPage {
                        page: page.number,
                        reason: format!("non-finite coordinates on word '{}'", w.text),
                    });
                }
                if w.x1 < w.x0 {
                    return Err(IngestError::MalformedPage {
                        page: page.number,
                        reason: format!("word '{}' has x1 < x0", w.text),
                    });
                }
            }
        }

        Ok(Self { pages })
    }

    /// Build a document straight from page texts (no word positions).
    pub fn from_texts<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| Page::new(i + 1, t))
            .collect();
        Self::new(pages)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn first_page(&self) -> &Page {
        // Non-empty by construction.
        &self.pages[0]
    }

    /// Text of every page joined with newlines.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All non-blank text lines in page order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::text_lines)
    }
}
