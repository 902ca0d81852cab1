//! stmtx-export: CSV/JSON writers and per-statement summaries

pub mod summary;
pub mod writer;

pub use summary::StatementSummary;
pub use writer::{CSV_HEADER, OutputFormat, output_path, write_csv, write_json, write_to_file};
