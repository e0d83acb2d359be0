//! Single-pass duplicate row detection.
//!
//! # Overview
//!
//! Every data row is classified exactly once, in input order:
//! - The first row with a given [`RowKey`] is **unique**
//! - Every later row with that key is a **duplicate** of it
//!
//! Rows too short to cover the selection are never dropped. Their missing
//! fields count as empty strings, and a [`ShortRow`] diagnostic is recorded.
//!
//! The set of seen keys belongs to one [`Deduplicator`], so separate runs
//! never share state.
//!
//! # Example
//!
//! ```
//! use csvdedup::dedup::deduplicate;
//! use csvdedup::selection::ColumnSelection;
//! use csvdedup::table::{Header, Row};
//!
//! let header = Header::new(["a", "b", "c"]);
//! let rows = Row::numbered([
//!     vec!["1", "2", "3"],
//!     vec!["1", "2", "9"],
//!     vec!["4", "5", "6"],
//! ]);
//! let selection = ColumnSelection::parse(&header, "0,1").unwrap();
//!
//! let result = deduplicate(&header, rows, &selection);
//!
//! assert_eq!(result.unique_rows.len(), 2);
//! assert_eq!(result.duplicate_count(), 1);
//! assert_eq!(result.duplicate_rows[0].row.line, 3);
//! assert_eq!(result.duplicate_rows[0].first_seen_line, 2);
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::key::RowKey;
use crate::selection::ColumnSelection;
use crate::table::{Header, Row};

/// A row that repeats the key of an earlier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRow {
    /// The duplicate row itself, with its own source line
    pub row: Row,
    /// Source line of the first row that had the same key
    pub first_seen_line: u64,
}

/// Diagnostic for a row with fewer fields than the selection needs.
///
/// Recorded per row and logged. It never aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortRow {
    /// Source line of the short row
    pub line: u64,
    /// Number of fields the row actually has
    pub field_count: usize,
    /// Number of fields needed to cover every selected column
    pub required: usize,
}

/// Outcome of classifying a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First row seen with its key
    Unique,
    /// Repeats the key first seen on `first_seen_line`
    Duplicate {
        /// Source line of the first occurrence
        first_seen_line: u64,
    },
}

impl Classification {
    /// Check if this classification is a duplicate.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Rows partitioned into first occurrences and duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupResult {
    /// First occurrence of each key, in input order
    pub unique_rows: Vec<Row>,
    /// Every later row sharing an already seen key, in input order
    pub duplicate_rows: Vec<DuplicateRow>,
    /// Rows that were too short for the selection (still classified)
    pub short_rows: Vec<ShortRow>,
}

impl DedupResult {
    /// Number of duplicate rows.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_rows.len()
    }

    /// Number of unique rows.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.unique_rows.len()
    }

    /// Total number of data rows classified.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.unique_rows.len() + self.duplicate_rows.len()
    }

    /// Check if any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_rows.is_empty()
    }
}

/// Classifies rows one at a time against the keys it has already seen.
///
/// # Example
///
/// ```
/// use csvdedup::dedup::{Classification, Deduplicator};
/// use csvdedup::selection::ColumnSelection;
/// use csvdedup::table::{Header, Row};
///
/// let header = Header::new(["email", "name"]);
/// let selection = ColumnSelection::parse(&header, "email").unwrap();
/// let mut dedup = Deduplicator::new(&selection);
///
/// assert_eq!(dedup.push(Row::new(2, ["a@x.io", "Ann"])), Classification::Unique);
/// assert!(dedup.push(Row::new(3, ["a@x.io", "Annie"])).is_duplicate());
///
/// let result = dedup.finish();
/// assert_eq!(result.duplicate_count(), 1);
/// ```
#[derive(Debug)]
pub struct Deduplicator<'a> {
    selection: &'a ColumnSelection,
    /// Seen keys mapped to the source line of their first occurrence
    seen: HashMap<RowKey, u64>,
    result: DedupResult,
}

impl<'a> Deduplicator<'a> {
    /// Create a deduplicator with an empty set of seen keys.
    #[must_use]
    pub fn new(selection: &'a ColumnSelection) -> Self {
        Self {
            selection,
            seen: HashMap::new(),
            result: DedupResult::default(),
        }
    }

    /// Classify `row` and append it to the matching partition.
    pub fn push(&mut self, row: Row) -> Classification {
        let required = self.selection.required_fields();
        if row.len() < required {
            log::warn!(
                "Line {}: row has {} fields but column {} is selected; missing fields treated as empty",
                row.line,
                row.len(),
                required - 1
            );
            self.result.short_rows.push(ShortRow {
                line: row.line,
                field_count: row.len(),
                required,
            });
        }

        let key = RowKey::build(&row, self.selection);
        match self.seen.get(&key) {
            Some(&first_seen_line) => {
                log::trace!(
                    "Line {}: duplicate of line {}",
                    row.line,
                    first_seen_line
                );
                self.result.duplicate_rows.push(DuplicateRow {
                    row,
                    first_seen_line,
                });
                Classification::Duplicate { first_seen_line }
            }
            None => {
                self.seen.insert(key, row.line);
                self.result.unique_rows.push(row);
                Classification::Unique
            }
        }
    }

    /// Number of distinct keys seen so far.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Consume the deduplicator and return the partitioned rows.
    #[must_use]
    pub fn finish(self) -> DedupResult {
        self.result
    }
}

/// Deduplicate `rows` on the columns in `selection`.
///
/// Runs a fresh [`Deduplicator`] over every row in order. Identical inputs
/// always produce identical results.
#[must_use]
pub fn deduplicate(header: &Header, rows: Vec<Row>, selection: &ColumnSelection) -> DedupResult {
    debug_assert!(
        selection.max_index() < header.len(),
        "selection exceeds header width"
    );

    log::debug!(
        "Deduplicating {} rows on columns {:?} ({} header columns)",
        rows.len(),
        selection.indices(),
        header.len()
    );

    let mut dedup = Deduplicator::new(selection);
    for row in rows {
        dedup.push(row);
    }

    log::debug!("{} distinct keys", dedup.seen_count());
    let result = dedup.finish();

    if !result.short_rows.is_empty() {
        log::warn!(
            "{} rows were shorter than the selected columns",
            result.short_rows.len()
        );
    }
    log::debug!(
        "{} unique rows, {} duplicate rows",
        result.unique_count(),
        result.duplicate_count()
    );

    result
}
