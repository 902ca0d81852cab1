//! Write extracted rows as CSV, or a whole statement as JSON.
//!
//! CSV columns, in order:
//! date,description,debit,credit,balance,bank
//!
//! Absent values are empty cells. Dates are ISO `YYYY-MM-DD`; amounts keep the
//! scale they were printed with; `bank` is the display label.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stmtx_core::TransactionRow;

pub const CSV_HEADER: [&str; 6] = ["date", "description", "debit", "credit", "balance", "bank"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected csv or json)")),
        }
    }
}

fn cell(amount: Option<Decimal>) -> String {
    amount.map(|v| v.to_string()).unwrap_or_default()
}

pub fn write_csv<W: Write>(rows: &[TransactionRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        let date = row.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        wtr.write_record([
            date,
            row.description.clone(),
            cell(row.debit),
            cell(row.credit),
            cell(row.balance),
            row.bank.label().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, W: Write>(value: &T, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// `<output_dir>/<input stem>.<ext>`
pub fn output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    output_dir.join(format!("{stem}.{}", format.extension()))
}

/// CSV takes the rows; JSON takes `document`, usually the whole statement.
pub fn write_to_file<T: Serialize>(
    path: &Path,
    format: OutputFormat,
    rows: &[TransactionRow],
    document: &T,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let written = match format {
        OutputFormat::Csv => write_csv(rows, &mut out),
        OutputFormat::Json => write_json(document, &mut out),
    };
    written
        .and_then(|()| Ok(out.flush()?))
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stmtx_core::BankTag;

    #[test]
    fn test_csv_columns_and_empty_cells() {
        let rows = vec![
            TransactionRow::new(BankTag::ChaseCreditCard, "STARBUCKS #123")
                .with_date(NaiveDate::from_ymd_opt(2024, 3, 10))
                .with_debit(Some(dec!(4.50))),
            TransactionRow::new(BankTag::Bmo, "Daily Balance, end of day").with_balance(Some(dec!(900.00))),
        ];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "date,description,debit,credit,balance,bank");
        assert_eq!(lines[1], "2024-03-10,STARBUCKS #123,4.50,,,Chase Credit Card");
        assert_eq!(lines[2], ",\"Daily Balance, end of day\",,,900.00,BMO");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_header_only_for_no_rows() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim_end(), CSV_HEADER.join(","));
    }

    #[test]
    fn test_output_path() {
        let p = output_path(Path::new("/in/march.json"), Path::new("/out"), OutputFormat::Csv);
        assert_eq!(p, PathBuf::from("/out/march.csv"));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }
}
