//! Command-line interface definitions for csvdedup.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Deduplicate on all columns
//! csvdedup people.csv
//!
//! # Deduplicate on columns 0 and 2
//! csvdedup -r 0,2 people.csv
//!
//! # Deduplicate on the first two columns
//! csvdedup -c 2 people.csv
//!
//! # List the header columns with their indices
//! csvdedup -q people.csv
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Remove duplicate rows from a CSV file based on selected columns.
///
/// Writes `<name>_deduped.<ext>` with the unique rows and
/// `<name>_duplicates.<ext>` with the removed rows next to the input.
#[derive(Debug, Parser)]
#[command(name = "csvdedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Columns to compare: zero-based indices, ranges or header names (e.g. 0,2 or 1-3)
    #[arg(short = 'r', long = "columns", value_name = "SPEC")]
    pub columns: Option<String>,

    /// Compare the first N columns (ignored when -r is given)
    #[arg(
        short = 'c',
        long = "count",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub count: Option<i64>,

    /// List the header columns with their indices and exit
    #[arg(short = 'q', long = "list-headers")]
    pub list_headers: bool,

    /// Field delimiter (single ASCII character; use '\t' or 'tab' for tabs)
    #[arg(short, long, value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Report what would be written without creating output files
    #[arg(long)]
    pub dry_run: bool,

    /// Omit the source_line/first_seen_line columns from the duplicates file
    #[arg(long)]
    pub no_annotate: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(long, conflicts_with = "verbose")]
    pub silent: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Report format for run results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a delimiter argument into a single ASCII character.
///
/// Accepts a literal character, or `\t` / `tab` for a tab.
///
/// # Examples
///
/// ```
/// use csvdedup::cli::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";").unwrap(), ';');
/// assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
/// assert_eq!(parse_delimiter("tab").unwrap(), '\t');
/// ```
///
/// # Errors
///
/// Returns an error if the value is empty, longer than one character, or
/// not ASCII.
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "\\t" | "tab" | "TAB" => return Ok('\t'),
        "" => return Err("Delimiter cannot be empty".to_string()),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        (Some(c), None) => Err(format!("Delimiter must be an ASCII character, got '{c}'")),
        _ => Err(format!("Delimiter must be a single character, got '{s}'")),
    }
}
