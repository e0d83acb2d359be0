//! csvdedup - CSV Row Deduplicator
//!
//! Removes duplicate rows from delimited text files, comparing rows on a
//! user-selected subset of columns, and lists header columns with their
//! indices.
//!
//! The pipeline runs strictly forward:
//! [`table`] (header and rows) → [`selection`] (key columns) →
//! [`dedup`] (unique/duplicate partition) → [`output`] (result files and reports).
//!
//! # Example
//!
//! ```
//! use csvdedup::dedup::deduplicate;
//! use csvdedup::selection::ColumnSelection;
//! use csvdedup::table::{ReadOptions, Table};
//!
//! let input = "a,b,c\n1,2,3\n1,2,9\n4,5,6\n";
//! let table = Table::read(input.as_bytes(), ReadOptions::default()).unwrap();
//! let selection = ColumnSelection::resolve(&table.header, Some("0,1"), None).unwrap();
//!
//! let result = deduplicate(&table.header, table.rows, &selection);
//! assert_eq!(result.duplicate_count(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod output;
pub mod selection;
pub mod table;

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::dedup::deduplicate;
use crate::error::ExitCode;
use crate::output::{HeaderListing, JsonOutput, OutputPaths, ReportWriter, TextSummary};
use crate::selection::ColumnSelection;
use crate::table::{ReadOptions, Table};

/// Run the application for parsed arguments, reporting to stdout.
///
/// # Errors
///
/// Returns an error if configuration, input, column selection or output
/// fails. Use [`ExitCode::for_error`] to map it to an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    run_to_writer(cli, &mut stdout.lock(), color)
}

/// Run the application, writing the report to `out`.
///
/// `color` says whether `out` can display ANSI colors; the configuration
/// can still turn colors off.
///
/// # Errors
///
/// Same as [`run_app`]. Argument and header errors are returned before any
/// output file is created.
pub fn run_to_writer<W: Write>(cli: Cli, out: &mut W, color: bool) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    config.validate()?;

    let color = color && config.color;
    let options = ReadOptions::default().with_delimiter(config.delimiter_byte());

    if cli.list_headers {
        let header = Table::header_from_path(&cli.path, options)
            .with_context(|| format!("Failed to read header of {}", cli.path.display()))?;
        let listing = HeaderListing::new(&header);
        match cli.format {
            OutputFormat::Text => write!(out, "{}", listing.to_text(color))?,
            OutputFormat::Json => writeln!(out, "{}", listing.to_json_pretty()?)?,
        }
        return Ok(ExitCode::Success);
    }

    if let (Some(spec), Some(count)) = (cli.columns.as_deref(), cli.count) {
        log::warn!(
            "Both a column specifier ('{}') and a count ({}) were given; using the specifier",
            spec,
            count
        );
    }

    let Table { header, rows } = Table::from_path(&cli.path, options)
        .with_context(|| format!("Failed to read {}", cli.path.display()))?;
    let selection = ColumnSelection::resolve(&header, cli.columns.as_deref(), cli.count)?;
    let paths = OutputPaths::derive(
        &cli.path,
        &config.deduped_suffix,
        &config.duplicates_suffix,
    )?;

    log::debug!(
        "Key columns: {:?} ({})",
        selection.indices(),
        selection.names(&header).join(", ")
    );

    let result = deduplicate(&header, rows, &selection);

    if cli.dry_run {
        log::info!("Dry run: no output files written");
    } else {
        ReportWriter::new(config.delimiter_byte())
            .with_annotation(config.annotate_duplicates)
            .write_files(&header, &result, &paths)?;
        log::info!("Deduplicated file written to {}", paths.deduped.display());
        log::info!("Duplicate rows written to {}", paths.duplicates.display());
    }

    match cli.format {
        OutputFormat::Text => write!(out, "{}", TextSummary::new(&result).render(color))?,
        OutputFormat::Json => {
            let written = (!cli.dry_run).then_some(&paths);
            let report = JsonOutput::new(&cli.path, &header, &selection, &result, written);
            writeln!(out, "{}", report.to_json_pretty()?)?;
        }
    }

    Ok(ExitCode::Success)
}
