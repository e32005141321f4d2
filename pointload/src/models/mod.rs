//! Domain models for the point loading pipeline.
//!
//! - [`Point`] - One monitoring point definition, built from one data row
//! - [`RowReport`] - Why a row was dropped
//! - [`SheetSummary`] - Per-sheet counters and skip reasons

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::FieldError;
use crate::mapping::duration::serialize_compact;

// =============================================================================
// Point
// =============================================================================

/// A monitoring point definition.
///
/// Every text field holds the trimmed cell verbatim; flags such as
/// `need_store` are kept as written in the sheet and never coerced.
/// `sheet_name` and `row_number` record where the point came from and are
/// never read from cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    // Identity / location
    pub sequence: String,
    pub business_unit: String,
    pub production_line: String,
    pub area: String,
    pub equipment: String,
    pub sub_equipment: String,
    pub point_name: String,

    // Sensing metadata
    pub sensor_type: String,
    pub data_type: String,
    pub precision: String,
    pub value_range: String,
    pub data_unit: String,

    // Acquisition
    #[serde(serialize_with = "serialize_compact")]
    pub sampling_frequency: Duration,
    pub data_source_address: String,
    pub io_address: String,

    // Identification
    pub device_code: String,
    pub device_sub_code: String,
    pub point_code: u64,
    pub point_extra_code: String,
    pub group_id: String,

    // Behavior flags
    pub need_store: String,
    pub need_publish: String,
    pub calculation_type: String,
    pub publish_topic: String,

    // Provenance
    pub sheet_name: String,
    pub row_number: usize,
}

impl Point {
    /// Create an empty point stamped with its origin.
    pub fn at(sheet_name: impl Into<String>, row_number: usize) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            row_number,
            ..Self::default()
        }
    }
}

// =============================================================================
// Row Report
// =============================================================================

/// A dropped row with every field error it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    pub sheet_name: String,
    /// 1-based, the header being row 1.
    pub row_number: usize,
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<FieldError>,
}

impl RowReport {
    /// Error messages in field order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

fn serialize_messages<S>(errors: &[FieldError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

// =============================================================================
// Sheet Summary
// =============================================================================

/// Why a whole sheet contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "camelCase")]
pub enum SheetSkip {
    /// The sheet could not be read.
    Unreadable(String),
    /// Only a header row (or nothing at all).
    NoDataRows,
}

/// Counters for one visited sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub name: String,
    /// Rows after the header, blank ones included.
    pub data_rows: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub blank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SheetSkip>,
    /// Header labels that appear in more than one column.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicate_headers: Vec<String>,
}

impl SheetSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn skipped(name: impl Into<String>, reason: SheetSkip) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::new(name)
        }
    }
}
