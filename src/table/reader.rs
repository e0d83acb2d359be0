//! Whole-file reading into a header and numbered rows.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde::Serialize;

use super::{Header, TableError};

/// Line number of the first data row (the header occupies line 1).
pub const FIRST_DATA_LINE: u64 = 2;

/// A data record together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 1-based source line number where the record starts
    pub line: u64,
    /// Field values, positionally aligned with the header
    pub fields: Vec<String>,
}

impl Row {
    /// Create a row from its source line and fields.
    pub fn new<I, S>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Number rows consecutively as they would appear after a header line.
    ///
    /// # Example
    ///
    /// ```
    /// use csvdedup::table::Row;
    ///
    /// let rows = Row::numbered([vec!["1", "2"], vec!["3", "4"]]);
    /// assert_eq!(rows[0].line, 2);
    /// assert_eq!(rows[1].line, 3);
    /// ```
    pub fn numbered<R, I, S>(records: R) -> Vec<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        records
            .into_iter()
            .zip(FIRST_DATA_LINE..)
            .map(|(fields, line)| Self::new(line, fields))
            .collect()
    }

    /// Field at `index`, if the row is long enough.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of fields in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Options controlling how input is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter byte
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReadOptions {
    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter);
        builder
    }
}

/// An input file held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Columns from the first record
    pub header: Header,
    /// Every record after the header, in input order
    pub rows: Vec<Row>,
}

impl Table {
    /// Read a whole delimited file.
    ///
    /// # Errors
    ///
    /// - [`TableError::IoWithPath`] if the file cannot be opened
    /// - [`TableError::MalformedInput`] if the file has no header line
    /// - [`TableError::Csv`] if a record cannot be parsed
    pub fn from_path(path: &Path, options: ReadOptions) -> Result<Self, TableError> {
        let file = open(path)?;
        Self::read(BufReader::new(file), options).map_err(|e| with_path(e, path))
    }

    /// Read only the header line of a delimited file.
    ///
    /// # Errors
    ///
    /// Same as [`Table::from_path`].
    pub fn header_from_path(path: &Path, options: ReadOptions) -> Result<Header, TableError> {
        let file = open(path)?;
        Self::read_header(BufReader::new(file), options).map_err(|e| with_path(e, path))
    }

    /// Read a header and all data rows from any reader.
    ///
    /// Blank lines are skipped. Row provenance is the source line where each
    /// record starts, counted from the raw input, so blank lines and quoted
    /// multi-line fields keep accurate numbering.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedInput`] if the input contains no records,
    /// or [`TableError::Io`] if the reader fails.
    pub fn read<R: io::Read>(mut reader: R, options: ReadOptions) -> Result<Self, TableError> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let mut lines = LineCounter::new(&input);
        let mut csv_reader = options.reader_builder().from_reader(input.as_slice());
        let mut records = csv_reader.records();

        let header = match records.next() {
            Some(record) => Header::from_record(&record?),
            None => return Err(empty_input()),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let line = record.position().map_or(FIRST_DATA_LINE + rows.len() as u64, |p| {
                lines.line_at(p.byte())
            });
            rows.push(Row::new(line, record.iter()));
        }

        log::debug!(
            "Read {} columns and {} data rows",
            header.len(),
            rows.len()
        );

        Ok(Self { header, rows })
    }

    /// Read just the header from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedInput`] if the input contains no records.
    pub fn read_header<R: io::Read>(reader: R, options: ReadOptions) -> Result<Header, TableError> {
        let mut csv_reader = options.reader_builder().from_reader(reader);
        let mut record = csv::StringRecord::new();
        if csv_reader.read_record(&mut record)? {
            Ok(Header::from_record(&record))
        } else {
            Err(empty_input())
        }
    }

    /// Number of data rows (excluding the header).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Maps byte offsets of record starts to 1-based line numbers.
///
/// Offsets must be queried in ascending order.
#[derive(Debug)]
struct LineCounter<'a> {
    input: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
        }
    }

    /// Line of the first content byte at or after `byte`.
    fn line_at(&mut self, byte: u64) -> u64 {
        let mut start = usize::try_from(byte)
            .unwrap_or(self.input.len())
            .min(self.input.len());
        // The reader may report a record start before the blank lines it skipped
        while matches!(self.input.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }

        if start > self.offset {
            let newlines = self.input[self.offset..start]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.line += newlines as u64;
            self.offset = start;
        }
        self.line
    }
}

fn open(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|source| TableError::IoWithPath {
        path: path.to_path_buf(),
        source,
    })
}

fn empty_input() -> TableError {
    TableError::MalformedInput("input is empty (no header line)".to_string())
}

fn with_path(err: TableError, path: &Path) -> TableError {
    match err {
        TableError::MalformedInput(reason) => {
            TableError::MalformedInput(format!("{}: {reason}", path.display()))
        }
        other => other,
    }
}
