//! Row deduplication.
//!
//! This module provides:
//! - Row key construction from the selected columns ([`key`])
//! - Single-pass classification of rows into unique and duplicate sets ([`engine`])

pub mod engine;
pub mod key;

pub use engine::{
    deduplicate, Classification, DedupResult, Deduplicator, DuplicateRow, ShortRow,
};
pub use key::{RowKey, KEY_ESCAPE, KEY_SEPARATOR};
