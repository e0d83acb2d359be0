//! Header parsing and column lookup.

use serde::Serialize;

use super::TableError;

/// A single header column: its zero-based position and its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderColumn {
    /// Zero-based column index
    pub index: usize,
    /// Column name as written in the header line
    pub name: String,
}

/// Ordered header columns, built once from the first input line.
///
/// Indices are always contiguous from 0. Names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<HeaderColumn>,
}

impl Header {
    /// Create a header from column names, numbering them from 0.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| HeaderColumn {
                index,
                name: name.into(),
            })
            .collect();
        Self { columns }
    }

    /// Create a header from an already parsed CSV record.
    #[must_use]
    pub fn from_record(record: &csv::StringRecord) -> Self {
        Self::new(record.iter())
    }

    /// Parse a single header line, splitting on `delimiter`.
    ///
    /// Standard CSV quoting is honoured, so `"a,b",c` yields two columns.
    /// A trailing line terminator is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedInput`] if the line is empty, or
    /// [`TableError::Csv`] if the parser rejects it.
    ///
    /// # Example
    ///
    /// ```
    /// use csvdedup::table::Header;
    ///
    /// let header = Header::parse_line("name,age,city", b',').unwrap();
    /// assert_eq!(header.name(2), Some("city"));
    /// ```
    pub fn parse_line(line: &str, delimiter: u8) -> Result<Self, TableError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(TableError::MalformedInput(
                "header line is empty".to_string(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Err(TableError::MalformedInput(
                "header line contains no fields".to_string(),
            ));
        }

        Ok(Self::from_record(&record))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the header has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All columns in order.
    #[must_use]
    pub fn columns(&self) -> &[HeaderColumn] {
        &self.columns
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Name of the column at `index`, if it exists.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.name.as_str())
    }

    /// Index of the first column named exactly `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.index)
    }
}
