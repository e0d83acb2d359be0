//! Composite row keys.

use crate::selection::ColumnSelection;
use crate::table::Row;

/// Separator placed between selected fields when building a key.
///
/// ASCII unit separator. Occurrences inside a field are escaped with
/// [`KEY_ESCAPE`], so distinct field tuples always give distinct keys.
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Escape character placed before a literal separator or escape in a field.
pub const KEY_ESCAPE: char = '\u{1b}';

/// Comparison key built from a row's selected fields.
///
/// Only used for equality; it is never decoded back into fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(String);

impl RowKey {
    /// Build the key for `row` from the fields at `selection`'s indices.
    ///
    /// Fields missing from short rows are treated as empty strings.
    ///
    /// # Example
    ///
    /// ```
    /// use csvdedup::dedup::RowKey;
    /// use csvdedup::selection::ColumnSelection;
    /// use csvdedup::table::{Header, Row};
    ///
    /// let header = Header::new(["a", "b", "c"]);
    /// let selection = ColumnSelection::parse(&header, "0,1").unwrap();
    ///
    /// let first = RowKey::build(&Row::new(2, ["1", "2", "3"]), &selection);
    /// let second = RowKey::build(&Row::new(3, ["1", "2", "9"]), &selection);
    /// assert_eq!(first, second);
    /// ```
    #[must_use]
    pub fn build(row: &Row, selection: &ColumnSelection) -> Self {
        let mut key = String::new();
        for (position, &index) in selection.indices().iter().enumerate() {
            if position > 0 {
                key.push(KEY_SEPARATOR);
            }
            for c in row.field(index).unwrap_or_default().chars() {
                if c == KEY_SEPARATOR || c == KEY_ESCAPE {
                    key.push(KEY_ESCAPE);
                }
                key.push(c);
            }
        }
        Self(key)
    }

    /// The raw key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Header;

    fn selection(spec: &str) -> ColumnSelection {
        let header = Header::new(["a", "b", "c"]);
        ColumnSelection::parse(&header, spec).unwrap()
    }

    #[test]
    fn test_key_uses_selection_order() {
        let row = Row::new(2, ["x", "y", "z"]);
        let key = RowKey::build(&row, &selection("2,0"));
        assert_eq!(key.as_str(), "z\u{1f}x");
    }

    #[test]
    fn test_key_separator_prevents_concatenation_collisions() {
        let sel = selection("0,1");
        let left = RowKey::build(&Row::new(2, ["ab", "c"]), &sel);
        let right = RowKey::build(&Row::new(3, ["a", "bc"]), &sel);
        assert_ne!(left, right);
    }

    #[test]
    fn test_separator_inside_field_is_escaped() {
        let sel = selection("0,1");
        let left = RowKey::build(&Row::new(2, ["x\u{1f}", "y"]), &sel);
        let right = RowKey::build(&Row::new(3, ["x", "\u{1f}y"]), &sel);
        assert_ne!(left, right);
        assert_eq!(left.as_str(), "x\u{1b}\u{1f}\u{1f}y");
    }

    #[test]
    fn test_short_row_padded_with_empty_fields() {
        let sel = selection("0,2");
        let short = RowKey::build(&Row::new(2, ["x"]), &sel);
        let padded = RowKey::build(&Row::new(3, ["x", "q", ""]), &sel);
        assert_eq!(short, padded);
    }

    #[test]
    fn test_unselected_fields_ignored() {
        let sel = selection("1");
        let a = RowKey::build(&Row::new(2, ["1", "same", "3"]), &sel);
        let b = RowKey::build(&Row::new(3, ["9", "same", "8"]), &sel);
        assert_eq!(a, b);
    }
}
