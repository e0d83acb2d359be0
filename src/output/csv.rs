//! CSV writers for deduplication results.
//!
//! Produces the two result files for an input such as `people.csv`:
//!
//! - `people_deduped.csv`: the header followed by every unique row
//! - `people_duplicates.csv`: the header followed by every duplicate row
//!
//! When annotation is enabled (the default) each duplicate row is prefixed
//! with two provenance columns:
//!
//! - `source_line`: line of the duplicate row in the input
//! - `first_seen_line`: line of the first row with the same key
//!
//! # Example
//!
//! ```
//! use csvdedup::dedup::deduplicate;
//! use csvdedup::output::csv::ReportWriter;
//! use csvdedup::selection::ColumnSelection;
//! use csvdedup::table::{Header, Row};
//!
//! let header = Header::new(["a", "b"]);
//! let rows = Row::numbered([vec!["1", "x"], vec!["1", "y"]]);
//! let selection = ColumnSelection::parse(&header, "0").unwrap();
//! let result = deduplicate(&header, rows, &selection);
//!
//! let writer = ReportWriter::new(b',');
//! let mut buffer = Vec::new();
//! writer.write_duplicates(&header, &result.duplicate_rows, &mut buffer).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(buffer).unwrap(),
//!     "source_line,first_seen_line,a,b\n3,2,1,y\n"
//! );
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dedup::{DedupResult, DuplicateRow};
use crate::table::{Header, Row};

/// Default suffix for the deduplicated file.
pub const DEFAULT_DEDUPED_SUFFIX: &str = "_deduped";

/// Default suffix for the duplicates file.
pub const DEFAULT_DUPLICATES_SUFFIX: &str = "_duplicates";

/// Provenance columns prepended to annotated duplicate rows.
pub const PROVENANCE_COLUMNS: [&str; 2] = ["source_line", "first_seen_line"];

/// Errors that can occur during output generation.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An output file could not be created.
    #[error("Failed to create {path}: {source}")]
    CreateFile {
        /// File that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output names cannot be derived from the input path.
    #[error("Cannot derive output file names from {0}")]
    InvalidInputPath(PathBuf),
}

/// Locations of the two result files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Header plus unique rows
    pub deduped: PathBuf,
    /// Header plus duplicate rows
    pub duplicates: PathBuf,
}

impl OutputPaths {
    /// Derive result file paths next to `input` by suffixing its file stem.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::InvalidInputPath`] if `input` has no file name.
    ///
    /// # Example
    ///
    /// ```
    /// use csvdedup::output::csv::OutputPaths;
    /// use std::path::{Path, PathBuf};
    ///
    /// let paths = OutputPaths::derive(Path::new("data/people.csv"), "_deduped", "_duplicates").unwrap();
    /// assert_eq!(paths.deduped, PathBuf::from("data/people_deduped.csv"));
    /// assert_eq!(paths.duplicates, PathBuf::from("data/people_duplicates.csv"));
    /// ```
    pub fn derive(
        input: &Path,
        deduped_suffix: &str,
        duplicates_suffix: &str,
    ) -> Result<Self, OutputError> {
        let stem = input
            .file_stem()
            .ok_or_else(|| OutputError::InvalidInputPath(input.to_path_buf()))?
            .to_string_lossy();

        let name_with = |suffix: &str| {
            let mut name = format!("{stem}{suffix}");
            if let Some(ext) = input.extension() {
                name.push('.');
                name.push_str(&ext.to_string_lossy());
            }
            input.with_file_name(name)
        };

        Ok(Self {
            deduped: name_with(deduped_suffix),
            duplicates: name_with(duplicates_suffix),
        })
    }
}

/// Writes deduplicated and duplicate rows as delimited text.
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    delimiter: u8,
    annotate: bool,
}

impl ReportWriter {
    /// Create a writer using `delimiter`, with duplicate annotation enabled.
    #[must_use]
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            annotate: true,
        }
    }

    /// Enable or disable the provenance columns in the duplicates output.
    #[must_use]
    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    fn csv_writer<W: io::Write>(&self, writer: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(writer)
    }

    /// Write the header followed by `rows`.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing or serialization fails.
    pub fn write_unique<W: io::Write>(
        &self,
        header: &Header,
        rows: &[Row],
        writer: W,
    ) -> Result<(), OutputError> {
        let mut csv_writer = self.csv_writer(writer);
        csv_writer.write_record(header.names())?;
        for row in rows {
            csv_writer.write_record(&row.fields)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the header followed by `duplicates`, annotated if enabled.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing or serialization fails.
    pub fn write_duplicates<W: io::Write>(
        &self,
        header: &Header,
        duplicates: &[DuplicateRow],
        writer: W,
    ) -> Result<(), OutputError> {
        let mut csv_writer = self.csv_writer(writer);

        if self.annotate {
            let mut names: Vec<&str> = PROVENANCE_COLUMNS.to_vec();
            names.extend(header.names());
            csv_writer.write_record(&names)?;
        } else {
            csv_writer.write_record(header.names())?;
        }

        for duplicate in duplicates {
            if self.annotate {
                let provenance = [
                    duplicate.row.line.to_string(),
                    duplicate.first_seen_line.to_string(),
                ];
                csv_writer.write_record(provenance.iter().chain(&duplicate.row.fields))?;
            } else {
                csv_writer.write_record(&duplicate.row.fields)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write both result files.
    ///
    /// Both files are created before either is written. If the second
    /// cannot be created the first is removed again.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if a file cannot be created or written.
    pub fn write_files(
        &self,
        header: &Header,
        result: &DedupResult,
        paths: &OutputPaths,
    ) -> Result<(), OutputError> {
        let deduped = create(&paths.deduped)?;
        let duplicates = match create(&paths.duplicates) {
            Ok(file) => file,
            Err(err) => {
                drop(deduped);
                if let Err(remove_err) = fs::remove_file(&paths.deduped) {
                    log::warn!(
                        "Failed to remove {}: {}",
                        paths.deduped.display(),
                        remove_err
                    );
                }
                return Err(err);
            }
        };

        self.write_unique(header, &result.unique_rows, deduped)?;
        log::debug!(
            "Wrote {} unique rows to {}",
            result.unique_count(),
            paths.deduped.display()
        );

        self.write_duplicates(header, &result.duplicate_rows, duplicates)?;
        log::debug!(
            "Wrote {} duplicate rows to {}",
            result.duplicate_count(),
            paths.duplicates.display()
        );

        Ok(())
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, OutputError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::CreateFile {
            path: path.to_path_buf(),
            source,
        })
}
