//! Column selection for dedup keys.
//!
//! Resolves what the user asked for into a concrete [`ColumnSelection`]:
//!
//! 1. A column specifier such as `0,2`, `1-3` or `email,1` (takes priority)
//! 2. A column count `n`, meaning the first `n` columns
//! 3. Otherwise, all columns
//!
//! # Example
//!
//! ```
//! use csvdedup::selection::ColumnSelection;
//! use csvdedup::table::Header;
//!
//! let header = Header::new(["id", "name", "email", "city"]);
//!
//! let selection = ColumnSelection::resolve(&header, Some("2,0"), None).unwrap();
//! assert_eq!(selection.indices(), &[2, 0]);
//!
//! let selection = ColumnSelection::resolve(&header, None, Some(2)).unwrap();
//! assert_eq!(selection.indices(), &[0, 1]);
//!
//! let selection = ColumnSelection::resolve(&header, None, None).unwrap();
//! assert_eq!(selection.indices(), &[0, 1, 2, 3]);
//! ```

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::table::Header;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Errors that can occur while resolving a column selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A specified index is outside the header.
    #[error("Invalid column index {index}: the header has {columns} columns (valid indices are 0 to {})", .columns.saturating_sub(1))]
    InvalidColumnIndex {
        /// The offending index
        index: usize,
        /// Number of header columns
        columns: usize,
    },

    /// A column count is zero, negative, or larger than the header.
    #[error("Invalid column count {count}: must be between 1 and {columns}")]
    InvalidColumnCount {
        /// The requested count
        count: i64,
        /// Number of header columns
        columns: usize,
    },

    /// A specifier item could not be parsed.
    #[error("Invalid column specifier '{item}': {reason}")]
    InvalidSpecifier {
        /// The offending item (or the whole specifier when empty)
        item: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// A specifier item named a column that is not in the header.
    #[error("Unknown column '{name}'{}", suggestion_hint(.suggestion))]
    UnknownColumn {
        /// The name as given
        name: String,
        /// Closest header name, if any is similar enough
        suggestion: Option<String>,
    },

    /// The header has no columns to select from.
    #[error("The header has no columns")]
    EmptyHeader,
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Ordered, duplicate-free, non-empty list of valid column indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSelection {
    indices: Vec<usize>,
}

impl ColumnSelection {
    /// Resolve a selection using specifier, then count, then all columns.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] if the specifier or count is invalid for
    /// this header.
    pub fn resolve(
        header: &Header,
        specifier: Option<&str>,
        count: Option<i64>,
    ) -> Result<Self, SelectionError> {
        match (specifier, count) {
            (Some(spec), _) => Self::parse(header, spec),
            (None, Some(count)) => Self::first(header, count),
            (None, None) => Self::all(header),
        }
    }

    /// Select every column in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::EmptyHeader`] if the header has no columns.
    pub fn all(header: &Header) -> Result<Self, SelectionError> {
        if header.is_empty() {
            return Err(SelectionError::EmptyHeader);
        }
        Ok(Self {
            indices: (0..header.len()).collect(),
        })
    }

    /// Select the first `count` columns.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidColumnCount`] unless
    /// `1 <= count <= header.len()`.
    pub fn first(header: &Header, count: i64) -> Result<Self, SelectionError> {
        let columns = header.len();
        let invalid = SelectionError::InvalidColumnCount { count, columns };
        let n = usize::try_from(count).map_err(|_| invalid.clone())?;
        if n == 0 || n > columns {
            return Err(invalid);
        }
        Ok(Self {
            indices: (0..n).collect(),
        })
    }

    /// Parse a comma-separated column specifier.
    ///
    /// Each item is a zero-based index (`3`), an inclusive range (`1-3`), or
    /// a header name. Digit-only items are always indices. An item matching
    /// a header name exactly is a name even when it looks like a range.
    /// Order is kept as written and repeated columns keep their first
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] naming the first item that is malformed,
    /// out of range, or unknown.
    pub fn parse(header: &Header, specifier: &str) -> Result<Self, SelectionError> {
        if specifier.trim().is_empty() {
            return Err(SelectionError::InvalidSpecifier {
                item: specifier.to_string(),
                reason: "specifier is empty",
            });
        }

        let mut indices = Vec::new();
        for item in specifier.split(',') {
            indices.extend(resolve_item(header, item.trim())?);
        }
        Self::from_indices(header, indices)
    }

    /// Build a selection from explicit indices, validating and deduplicating.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidColumnIndex`] for the first index
    /// outside the header, or [`SelectionError::InvalidSpecifier`] if no
    /// indices are given.
    pub fn from_indices<I>(header: &Header, indices: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = usize>,
    {
        let columns = header.len();
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for index in indices {
            if index >= columns {
                return Err(SelectionError::InvalidColumnIndex { index, columns });
            }
            if seen.insert(index) {
                ordered.push(index);
            }
        }

        if ordered.is_empty() {
            return Err(SelectionError::InvalidSpecifier {
                item: String::new(),
                reason: "no columns selected",
            });
        }

        Ok(Self { indices: ordered })
    }

    /// Selected indices in key order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of selected columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false for a resolved selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Largest selected index.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.indices.iter().copied().max().unwrap_or(0)
    }

    /// Minimum number of fields a row needs to cover every selected column.
    #[must_use]
    pub fn required_fields(&self) -> usize {
        self.max_index() + 1
    }

    /// Check whether this selection covers every header column in order.
    #[must_use]
    pub fn is_all(&self, header: &Header) -> bool {
        self.indices.len() == header.len() && self.indices.iter().enumerate().all(|(i, &c)| i == c)
    }

    /// Header names of the selected columns, in key order.
    #[must_use]
    pub fn names<'h>(&self, header: &'h Header) -> Vec<&'h str> {
        self.indices
            .iter()
            .filter_map(|&i| header.name(i))
            .collect()
    }
}

fn range_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(\d+)\s*-\s*(\d+)$").ok())
        .as_ref()
}

fn resolve_item(header: &Header, item: &str) -> Result<Vec<usize>, SelectionError> {
    if item.is_empty() {
        return Err(SelectionError::InvalidSpecifier {
            item: item.to_string(),
            reason: "empty item between commas",
        });
    }

    if item.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(vec![parse_index(item)?]);
    }

    if let Some(index) = header.position(item) {
        return Ok(vec![index]);
    }

    if let Some(caps) = range_pattern().and_then(|re| re.captures(item)) {
        let start = parse_index(&caps[1])?;
        let end = parse_index(&caps[2])?;
        if start > end {
            return Err(SelectionError::InvalidSpecifier {
                item: item.to_string(),
                reason: "range start is greater than range end",
            });
        }
        // Check bounds before expanding
        let columns = header.len();
        if end >= columns {
            return Err(SelectionError::InvalidColumnIndex {
                index: start.max(columns),
                columns,
            });
        }
        return Ok((start..=end).collect());
    }

    if let Some(digits) = item.strip_prefix('-').filter(|d| !d.is_empty()) {
        if digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SelectionError::InvalidSpecifier {
                item: item.to_string(),
                reason: "column indices cannot be negative",
            });
        }
    }

    Err(SelectionError::UnknownColumn {
        name: item.to_string(),
        suggestion: suggest_column(header, item),
    })
}

fn parse_index(digits: &str) -> Result<usize, SelectionError> {
    digits
        .parse()
        .map_err(|_| SelectionError::InvalidSpecifier {
            item: digits.to_string(),
            reason: "index is too large",
        })
}

fn suggest_column(header: &Header, name: &str) -> Option<String> {
    let needle = name.to_lowercase();
    header
        .names()
        .map(|candidate| (candidate, strsim::jaro_winkler(&needle, &candidate.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}
