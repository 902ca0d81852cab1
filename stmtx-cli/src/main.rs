use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use stmtx_core::{Document, JsonLayoutProvider, LayoutProvider};
use stmtx_export::{OutputFormat, StatementSummary, write_csv, write_json, write_to_file};
use stmtx_ingest::{ParseOptions, inspect_document, parse_document, select_parser};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod batch;
mod config;
mod state;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STMTX_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "stmtx",
    version,
    long_version = LONG_VERSION,
    about = "Extract transactions from bank statement layout dumps"
)]
struct Cli {
    /// Year for yearless dates when a statement names no period (overrides config)
    #[arg(long, global = true)]
    fallback_year: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one layout dump and write its rows
    Parse {
        /// JSON layout dump produced by the PDF text extractor
        dump: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// csv or json (default: from --out extension, else config)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Show detected bank, chosen parser and statement info without parsing rows
    Detect {
        dump: PathBuf,
    },

    /// Parse every *.json dump in a directory concurrently
    Batch {
        /// Input directory (default: config batch.input_dir)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory (default: config batch.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Max documents parsed at once (default: config batch.workers)
        #[arg(long)]
        workers: Option<usize>,

        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Manage ~/.stmtx/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Config and logging for the commands that read statements.
fn setup(cli_fallback_year: Option<i32>) -> Result<(config::Config, ParseOptions)> {
    let cfg = config::load_config()?;
    init_tracing(&cfg.log.filter);
    let opts = ParseOptions::default().with_fallback_year(cli_fallback_year.or(cfg.parse.fallback_year));
    Ok((cfg, opts))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { dump, out, format } => {
            let (cfg, opts) = setup(cli.fallback_year)?;
            let format = format
                .or_else(|| out.as_deref().and_then(format_from_extension))
                .unwrap_or(cfg.batch.format);
            parse_cmd(&dump, out.as_deref(), format, &opts)?;
        }

        Command::Detect { dump } => {
            let (_, opts) = setup(cli.fallback_year)?;
            detect_cmd(&dump, &opts)?;
        }

        Command::Batch {
            input,
            output,
            workers,
            format,
        } => {
            let (cfg, opts) = setup(cli.fallback_year)?;
            let job = batch::BatchJob {
                input_dir: input.unwrap_or(cfg.batch.input_dir),
                output_dir: output.unwrap_or(cfg.batch.output_dir),
                workers: workers.unwrap_or(cfg.batch.workers),
                format: format.unwrap_or(cfg.batch.format),
                opts,
            };
            if !job.input_dir.is_dir() {
                bail!(
                    "Input directory not found: {} (pass --input <dir>)",
                    job.input_dir.display()
                );
            }
            batch_cmd(job).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    path.extension()?.to_str()?.parse().ok()
}

fn load_dump(path: &Path) -> Result<Document> {
    if !path.exists() {
        bail!("Layout dump not found: {}", path.display());
    }
    JsonLayoutProvider
        .load(path)
        .with_context(|| format!("loading {}", path.display()))
}

fn parse_cmd(dump: &Path, out: Option<&Path>, format: OutputFormat, opts: &ParseOptions) -> Result<()> {
    let doc = load_dump(dump)?;
    let stmt = parse_document(&doc, opts);
    if stmt.rows.is_empty() {
        warn!(file = %dump.display(), bank = %stmt.info.bank, "no transactions found");
    }
    let summary = StatementSummary::from_rows(&stmt.rows);

    match out {
        Some(path) => {
            write_to_file(path, format, &stmt.rows, &stmt)?;
            println!(
                "{} [{}] -> {}",
                dump.display(),
                stmt.info.bank,
                path.display()
            );
            println!("{summary}");
        }
        None => {
            let stdout = io::stdout().lock();
            match format {
                OutputFormat::Csv => write_csv(&stmt.rows, stdout)?,
                OutputFormat::Json => write_json(&stmt, stdout)?,
            }
            eprintln!("{summary}");
        }
    }
    Ok(())
}

fn detect_cmd(dump: &Path, opts: &ParseOptions) -> Result<()> {
    let doc = load_dump(dump)?;
    let info = inspect_document(&doc, opts);
    let parser = select_parser(info.bank, &doc);

    let mut out = io::stdout().lock();
    writeln!(out, "file:           {}", dump.display())?;
    writeln!(out, "bank:           {}", info.bank)?;
    writeln!(out, "parser:         {}", parser.name())?;
    writeln!(out, "pages:          {}", doc.pages().len())?;
    match info.period {
        Some(p) => writeln!(out, "period:         {} .. {}", p.start, p.end)?,
        None => writeln!(out, "period:         (not found)")?,
    }
    writeln!(out, "statement year: {}", info.statement_year)?;
    writeln!(
        out,
        "account:        {}",
        info.account_number.as_deref().unwrap_or("(not found)")
    )?;
    Ok(())
}

async fn batch_cmd(job: batch::BatchJob) -> Result<()> {
    let input_dir = job.input_dir.clone();
    let report = batch::run_batch(job).await?;

    if report.processed.is_empty() && report.failed.is_empty() {
        println!("No *.json layout dumps in {}", input_dir.display());
        return Ok(());
    }

    for f in &report.processed {
        println!(
            "{} [{}] rows={} -> {}",
            f.input.display(),
            f.bank,
            f.rows,
            f.output.display()
        );
    }
    for (path, err) in &report.failed {
        println!("FAILED {}: {}", path.display(), err);
    }

    let empty = report.processed.iter().filter(|f| f.rows == 0).count();
    println!(
        "\nProcessed {} file(s), {} failed, {} with no transactions",
        report.processed.len(),
        report.failed.len(),
        empty
    );
    Ok(())
}
