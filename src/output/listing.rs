//! Header listing (`index: name` pairs).

use yansi::Paint;

use super::csv::OutputError;
use crate::table::{Header, HeaderColumn};

/// Lists every header column with its zero-based index.
///
/// # Example
///
/// ```
/// use csvdedup::output::HeaderListing;
/// use csvdedup::table::Header;
///
/// let header = Header::new(["name", "age", "city"]);
/// let listing = HeaderListing::new(&header);
///
/// assert_eq!(listing.to_text(false), "0: name\n1: age\n2: city\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeaderListing<'a> {
    header: &'a Header,
}

impl<'a> HeaderListing<'a> {
    /// Create a listing for `header`.
    #[must_use]
    pub fn new(header: &'a Header) -> Self {
        Self { header }
    }

    /// One `index: name` line per column.
    #[must_use]
    pub fn to_text(&self, color: bool) -> String {
        let mut out = String::new();
        for HeaderColumn { index, name } in self.header.columns() {
            if color {
                out.push_str(&format!("{}: {}\n", index.cyan().bold(), name));
            } else {
                out.push_str(&format!("{index}: {name}\n"));
            }
        }
        out
    }

    /// Pretty-printed JSON array of `{"index", "name"}` objects.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(self.header.columns())?)
    }
}
