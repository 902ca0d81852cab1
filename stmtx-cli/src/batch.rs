//! Batch mode: every `*.json` layout dump in a directory, parsed concurrently.
//!
//! Documents share nothing, so each one is parsed on the blocking pool; a
//! semaphore caps how many run at once.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stmtx_core::{BankTag, JsonLayoutProvider};
use stmtx_export::{OutputFormat, output_path, write_to_file};
use stmtx_ingest::{ParseOptions, parse_path};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct BatchJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub workers: usize,
    pub format: OutputFormat,
    pub opts: ParseOptions,
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub bank: BankTag,
    pub rows: usize,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<FileOutcome>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Layout dumps in `dir`, sorted by name.
pub fn list_dumps(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dumps = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            dumps.push(path);
        }
    }
    dumps.sort();
    Ok(dumps)
}

fn process_one(input: &Path, output_dir: &Path, format: OutputFormat, opts: &ParseOptions) -> Result<FileOutcome> {
    let stmt = parse_path(&JsonLayoutProvider, input, opts)
        .with_context(|| format!("parsing {}", input.display()))?;
    if stmt.rows.is_empty() {
        warn!(file = %input.display(), bank = %stmt.info.bank, "no transactions found");
    }

    let output = output_path(input, output_dir, format);
    write_to_file(&output, format, &stmt.rows, &stmt)?;

    Ok(FileOutcome {
        input: input.to_path_buf(),
        output,
        bank: stmt.info.bank,
        rows: stmt.rows.len(),
    })
}

pub async fn run_batch(job: BatchJob) -> Result<BatchReport> {
    let dumps = list_dumps(&job.input_dir)?;
    if dumps.is_empty() {
        warn!(dir = %job.input_dir.display(), "no *.json layout dumps found");
        return Ok(BatchReport::default());
    }
    fs::create_dir_all(&job.output_dir)
        .with_context(|| format!("create {}", job.output_dir.display()))?;

    let workers = job.workers.max(1);
    info!(files = dumps.len(), workers, "batch started");

    let permits = Arc::new(Semaphore::new(workers));
    let mut set = JoinSet::new();
    for input in dumps {
        let permit = permits.clone().acquire_owned().await?;
        let output_dir = job.output_dir.clone();
        let (format, opts) = (job.format, job.opts);
        set.spawn_blocking(move || {
            let _permit = permit;
            let result = process_one(&input, &output_dir, format, &opts);
            (input, result)
        });
    }

    let mut report = BatchReport::default();
    while let Some(joined) = set.join_next().await {
        let (input, result) = joined.context("batch worker panicked")?;
        match result {
            Ok(outcome) => report.processed.push(outcome),
            Err(e) => {
                let msg = format!("{e:#}");
                warn!(file = %input.display(), error = %msg, "document failed");
                report.failed.push((input, msg));
            }
        }
    }
    report.processed.sort_by(|a, b| a.input.cmp(&b.input));
    Ok(report)
}
