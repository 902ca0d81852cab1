//! Errors raised when the layout provider hands us something we cannot parse.
//!
//! Field-level problems (a bad amount, a bad date) never surface here; they
//! degrade to `None` on the affected row.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("document has no pages")]
    EmptyDocument,

    #[error("page {page}: {reason}")]
    MalformedPage { page: usize, reason: String },

    #[error("reading layout dump {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding layout dump {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
