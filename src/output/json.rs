//! JSON output formatter for deduplication results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "input": "people.csv",
//!     "columns": [0, 1],
//!     "column_names": ["name", "email"],
//!     "total_rows": 120,
//!     "unique_rows": 117,
//!     "duplicate_rows": 3,
//!     "short_rows": 0,
//!     "deduped_file": "people_deduped.csv",
//!     "duplicates_file": "people_duplicates.csv"
//!   },
//!   "duplicates": [
//!     { "line": 14, "first_seen_line": 3 }
//!   ],
//!   "short_rows": []
//! }
//! ```
//!
//! Output file entries are `null` on dry runs.

use std::path::Path;

use serde::Serialize;

use super::csv::{OutputError, OutputPaths};
use crate::dedup::{DedupResult, ShortRow};
use crate::selection::ColumnSelection;
use crate::table::Header;

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Input file as given on the command line
    pub input: String,
    /// Selected column indices in key order
    pub columns: Vec<usize>,
    /// Header names of the selected columns
    pub column_names: Vec<String>,
    /// Number of data rows read
    pub total_rows: usize,
    /// Number of rows kept
    pub unique_rows: usize,
    /// Number of rows removed as duplicates
    pub duplicate_rows: usize,
    /// Number of rows shorter than the selection
    pub short_rows: usize,
    /// Deduplicated output file, if written
    pub deduped_file: Option<String>,
    /// Duplicates output file, if written
    pub duplicates_file: Option<String>,
}

/// Provenance of a single duplicate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JsonDuplicate {
    /// Source line of the duplicate
    pub line: u64,
    /// Source line of the first occurrence of its key
    pub first_seen_line: u64,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Run summary
    pub summary: JsonSummary,
    /// Every duplicate row with its provenance
    pub duplicates: Vec<JsonDuplicate>,
    /// Rows shorter than the selection
    pub short_rows: Vec<ShortRow>,
}

impl JsonOutput {
    /// Build the JSON report for one run.
    ///
    /// Pass `paths` only when the result files were actually written.
    #[must_use]
    pub fn new(
        input: &Path,
        header: &Header,
        selection: &ColumnSelection,
        result: &DedupResult,
        paths: Option<&OutputPaths>,
    ) -> Self {
        let summary = JsonSummary {
            input: input.display().to_string(),
            columns: selection.indices().to_vec(),
            column_names: selection
                .names(header)
                .into_iter()
                .map(str::to_string)
                .collect(),
            total_rows: result.total_rows(),
            unique_rows: result.unique_count(),
            duplicate_rows: result.duplicate_count(),
            short_rows: result.short_rows.len(),
            deduped_file: paths.map(|p| p.deduped.display().to_string()),
            duplicates_file: paths.map(|p| p.duplicates.display().to_string()),
        };

        let duplicates = result
            .duplicate_rows
            .iter()
            .map(|d| JsonDuplicate {
                line: d.row.line,
                first_seen_line: d.first_seen_line,
            })
            .collect();

        Self {
            summary,
            duplicates,
            short_rows: result.short_rows.clone(),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
