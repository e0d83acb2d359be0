//! Delimited input reading.
//!
//! This module turns a CSV (or other single-byte delimited) file into a
//! [`Header`] and a list of numbered [`Row`]s:
//! - The first record is the header, with columns indexed from 0
//! - Every later record is a data row carrying its source line number
//! - Records may have any number of fields (short rows are handled downstream)
//!
//! # Example
//!
//! ```
//! use csvdedup::table::{ReadOptions, Table};
//!
//! let input = "name,age\nalice,30\nbob,41\n";
//! let table = Table::read(input.as_bytes(), ReadOptions::default()).unwrap();
//!
//! assert_eq!(table.header.len(), 2);
//! assert_eq!(table.rows.len(), 2);
//! assert_eq!(table.rows[0].line, 2);
//! ```

pub mod header;
pub mod reader;

use std::path::PathBuf;

use thiserror::Error;

pub use header::{Header, HeaderColumn};
pub use reader::{ReadOptions, Row, Table};

/// Errors that can occur while reading delimited input.
#[derive(Debug, Error)]
pub enum TableError {
    /// The input has no header line (empty file or header-less input).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An I/O error occurred while opening the input.
    #[error("I/O error for {path}: {source}")]
    IoWithPath {
        /// Path that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV parser rejected the input (invalid UTF-8, I/O failure mid-read).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
