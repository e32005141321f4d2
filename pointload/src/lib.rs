//! # Pointload - monitoring point definitions from spreadsheets
//!
//! Pointload reads a workbook of point definitions (one sheet per line or
//! area, one row per point), maps columns to fields by their header label,
//! validates the point code and sampling frequency, and reports which rows
//! were accepted and why the others were dropped.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Workbook   │────▶│    Sheet    │────▶│   Mapping   │────▶│ LoadReport  │
//! │ (xlsx/csv)  │     │ (text grid) │     │ (+validate) │     │ (+summary)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pointload::{load_points, render_summary, LoadOptions};
//!
//! let report = load_points(&LoadOptions::new("points.xlsx")).unwrap();
//! print!("{}", render_summary(&report));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Point, row reports, sheet summaries
//! - [`sheet`] - Workbook and delimited readers
//! - [`mapping`] - Header index, column contract, field decoding
//! - [`pipeline`] - Sheet iteration and row processing
//! - [`report`] - Console rendering
//! - [`config`] - Run options
//! - [`logs`] - Log helpers

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Reading
pub mod sheet;

// Mapping
pub mod mapping;

// Pipeline
pub mod pipeline;

// Output
pub mod report;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{DurationParseError, FieldError, LoadError, SheetError};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use config::LoadOptions;
pub use models::{Point, RowReport, SheetSkip, SheetSummary};

// =============================================================================
// Re-exports - Sources
// =============================================================================

pub use sheet::{open_workbook, InMemorySheets, SheetSource, Workbook};

// =============================================================================
// Re-exports - Mapping
// =============================================================================

pub use mapping::{
    format_duration, parse_duration, FieldKind, FieldSpec, HeaderCollision, HeaderIndex, FIELDS,
};

// =============================================================================
// Re-exports - Pipeline and output
// =============================================================================

pub use pipeline::{load_from_source, load_points, process_sheet, LoadReport, RowOutcome};
pub use report::{render_point, render_rejection, render_sheets, render_summary};
