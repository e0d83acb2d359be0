//! Plain-text run summary.

use yansi::Paint;

use crate::dedup::DedupResult;

/// Human-readable summary of a deduplication run.
///
/// Only the duplicate count goes to stdout. File locations and short-row
/// warnings are reported through the log.
#[derive(Debug, Clone, Copy)]
pub struct TextSummary<'a> {
    result: &'a DedupResult,
}

impl<'a> TextSummary<'a> {
    /// Create a summary for `result`.
    #[must_use]
    pub fn new(result: &'a DedupResult) -> Self {
        Self { result }
    }

    /// Render the summary line.
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        let count = self.result.duplicate_count();
        if color {
            let painted = if count == 0 {
                count.green().bold()
            } else {
                count.yellow().bold()
            };
            format!("Duplicates found: {painted}\n")
        } else {
            format!("Duplicates found: {count}\n")
        }
    }
}
