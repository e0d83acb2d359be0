//! Structured error handling and exit codes.

use serde::Serialize;

use crate::selection::SelectionError;
use crate::table::TableError;

/// Exit codes for the csvdedup application.
///
/// - 0: Success (with or without duplicates)
/// - 1: General error (I/O, CSV parsing, configuration)
/// - 2: Invalid arguments (column index, count or specifier)
/// - 3: Malformed input (empty or header-less file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the run completed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid arguments: the column selection could not be resolved.
    InvalidArguments = 2,
    /// Malformed input: the file has no header line.
    MalformedInput = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "CD000",
            Self::GeneralError => "CD001",
            Self::InvalidArguments => "CD002",
            Self::MalformedInput => "CD003",
        }
    }

    /// Pick the exit code for an application error by its root cause.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.downcast_ref::<SelectionError>().is_some() {
                return Self::InvalidArguments;
            }
            if let Some(TableError::MalformedInput(_)) = cause.downcast_ref::<TableError>() {
                return Self::MalformedInput;
            }
        }
        Self::GeneralError
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "CD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
