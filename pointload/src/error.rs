//! Error types for the point loading pipeline.
//!
//! - [`SheetError`] - Opening and reading the tabular source
//! - [`DurationParseError`] - Compound duration expressions
//! - [`FieldError`] - Row-local decoding failures (the row is dropped)
//! - [`LoadError`] - Top-level errors returned by [`crate::load_points`]
//!
//! Only [`LoadError`] aborts a run. Field errors are collected per row and
//! surface in [`crate::RowReport`].

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Sheet Source Errors
// =============================================================================

/// Errors while opening or reading a tabular source.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The workbook could not be opened.
    #[error("Failed to open '{path}': {message}")]
    Open { path: PathBuf, message: String },

    /// A sheet could not be read.
    #[error("Failed to read sheet '{sheet}': {message}")]
    Read { sheet: String, message: String },

    /// The source has no sheet with this name.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid delimited text.
    #[error("Invalid delimited text: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Duration Parsing Errors
// =============================================================================

/// Errors from [`crate::mapping::duration::parse_duration`].
///
/// The payload is the full expression (or the offending unit), quoted in
/// the message so whitespace and empty input stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

// =============================================================================
// Field Errors (row-local)
// =============================================================================

/// A single field decoding failure.
///
/// `field` is the human name of the record field (e.g. `point code`). The
/// display text is what operators see next to the sheet and row number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The cell exists but is blank.
    #[error("{field} is empty")]
    Empty { field: &'static str },

    /// The column is absent or the row is too short (strict mode only).
    #[error("{field} is missing")]
    Missing { field: &'static str },

    /// The cell is not a base-10 unsigned integer.
    #[error("{field} invalid: {reason}")]
    InvalidInteger { field: &'static str, reason: String },

    /// The cell is not a duration expression, even after unit inference.
    #[error("{field} parse failed: {source} → {raw}")]
    InvalidDuration {
        field: &'static str,
        raw: String,
        source: DurationParseError,
    },

    /// The duration parsed to zero or a negative value.
    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },
}

impl FieldError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Empty { field }
            | FieldError::Missing { field }
            | FieldError::InvalidInteger { field, .. }
            | FieldError::InvalidDuration { field, .. }
            | FieldError::NotPositive { field } => field,
        }
    }
}

// =============================================================================
// Load Errors (top-level)
// =============================================================================

/// Errors that abort a whole run.
///
/// Everything below the workbook level (unreadable sheets, bad cells) is
/// tolerated and reported in the [`crate::LoadReport`] instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened.
    #[error("Source error: {0}")]
    Source(#[from] SheetError),

    /// No input path was configured.
    #[error("No input file configured (pass a path or set {0})")]
    MissingPath(&'static str),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for sheet source operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for field decoding.
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type for a whole run.
pub type LoadResult<T> = Result<T, LoadError>;
