//! Output formatters for deduplication results.
//!
//! This module provides:
//! - CSV result files (deduplicated rows and annotated duplicates)
//! - JSON reports for automation and scripting
//! - Plain-text summaries and header listings for the terminal

pub mod csv;
pub mod json;
pub mod listing;
pub mod text;

// Re-export main types
pub use self::csv::{OutputError, OutputPaths, ReportWriter};
pub use json::JsonOutput;
pub use listing::HeaderListing;
pub use text::TextSummary;
