//! Boundary to the PDF text/layout extractor.
//!
//! The extractor itself lives outside this workspace. It hands over a JSON
//! layout dump shaped like:
//!
//! ```json
//! {"pages": [{"number": 1, "text": "...", "words": [{"text": "03/10", "x0": 10.0, "x1": 32.5, "top": 101.2}]}]}
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::document::{Document, Page};
use crate::error::{IngestError, Result};

/// Anything that can turn a statement file into validated pages.
pub trait LayoutProvider {
    fn load(&self, path: &Path) -> Result<Document>;
}

#[derive(Debug, Deserialize)]
struct LayoutDump {
    pages: Vec<Page>,
}

/// Reads pdfplumber-style JSON dumps from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLayoutProvider;

impl JsonLayoutProvider {
    pub fn parse_str(&self, path: &Path, s: &str) -> Result<Document> {
        let dump: LayoutDump = serde_json::from_str(s).map_err(|source| IngestError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Document::new(dump.pages)
    }
}

impl LayoutProvider for JsonLayoutProvider {
    fn load(&self, path: &Path) -> Result<Document> {
        let s = fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(path, &s)
    }
}
