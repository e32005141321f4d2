//! Load pipeline: workbook → sheets → rows → points.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Workbook   │────▶│   Sheets    │────▶│ Header index│────▶│ Points +    │
//! │ (xlsx/csv)  │     │ (in order)  │     │ + row decode│     │ row reports │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! A run is a single forward pass. Only failing to open the workbook is
//! fatal; unreadable sheets and bad rows are recorded and skipped.
//!
//! # Example
//!
//! ```rust,no_run
//! use pointload::{load_points, LoadOptions};
//!
//! let report = load_points(&LoadOptions::new("points.xlsx")).unwrap();
//! println!("{} valid points", report.points.len());
//! ```

use serde::Serialize;

use crate::config::LoadOptions;
use crate::error::{LoadError, LoadResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::mapping::HeaderIndex;
use crate::models::{Point, RowReport, SheetSkip, SheetSummary};
use crate::report::render_rejection;
use crate::sheet::{open_workbook, SheetSource};

pub mod row;

pub use row::{process_row, RowOutcome};

/// Result of a run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Accepted points, in sheet then row order.
    pub points: Vec<Point>,
    /// Dropped rows, in the same order.
    pub rejected: Vec<RowReport>,
    /// One entry per visited sheet.
    pub sheets: Vec<SheetSummary>,
    /// Sheets named in the filter that the workbook does not have.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_sheets: Vec<String>,
}

impl LoadReport {
    pub fn valid_count(&self) -> usize {
        self.points.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Points and reports from one sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetOutcome {
    pub points: Vec<Point>,
    pub rejected: Vec<RowReport>,
    pub summary: SheetSummary,
}

/// Open the configured file and load every point from it.
pub fn load_points(options: &LoadOptions) -> LoadResult<LoadReport> {
    if options.path.as_os_str().is_empty() {
        return Err(LoadError::MissingPath(crate::config::FILE_ENV_VAR));
    }

    log_info(format!("Opening {}", options.path.display()));
    let mut workbook = open_workbook(&options.path)?;
    Ok(load_from_source(&mut workbook, options))
}

/// Load points from an already opened source.
///
/// `options.path` is not used here.
pub fn load_from_source<S>(source: &mut S, options: &LoadOptions) -> LoadReport
where
    S: SheetSource + ?Sized,
{
    let names = source.sheet_names();
    let mut report = LoadReport {
        missing_sheets: options
            .sheets
            .iter()
            .filter(|wanted| !names.contains(wanted))
            .cloned()
            .collect(),
        ..LoadReport::default()
    };
    for missing in &report.missing_sheets {
        log_warning(format!("Sheet '{}' not found in workbook", missing));
    }

    for name in names.iter().filter(|n| options.includes_sheet(n)) {
        log_info(format!("Parsing sheet '{}'", name));

        let outcome = match source.read_rows(name) {
            Ok(rows) => process_sheet(name, &rows, options),
            Err(e) => {
                log_info_indent(format!("skipped: {}", e), 1);
                SheetOutcome {
                    summary: SheetSummary::skipped(name.as_str(), SheetSkip::Unreadable(e.to_string())),
                    ..SheetOutcome::default()
                }
            }
        };

        report.points.extend(outcome.points);
        report.rejected.extend(outcome.rejected);
        report.sheets.push(outcome.summary);
    }

    log_success(format!(
        "Parsed {} valid points ({} rows rejected)",
        report.valid_count(),
        report.invalid_count()
    ));
    report
}

/// Run the row processor over one sheet's rows.
///
/// Row 0 is the header. Sheets with fewer than two rows are skipped
/// without producing reports.
pub fn process_sheet(name: &str, rows: &[Vec<String>], options: &LoadOptions) -> SheetOutcome {
    let Some((header, data)) = rows.split_first().filter(|(_, data)| !data.is_empty()) else {
        log_info_indent("skipped: no data rows", 1);
        return SheetOutcome {
            summary: SheetSummary::skipped(name, SheetSkip::NoDataRows),
            ..SheetOutcome::default()
        };
    };

    let index = HeaderIndex::build(header, options.header_collision);
    for duplicate in index.duplicates() {
        log_warning(format!(
            "Sheet[{}] header '{}' appears more than once",
            name, duplicate
        ));
    }

    let mut outcome = SheetOutcome {
        summary: SheetSummary {
            data_rows: data.len(),
            duplicate_headers: index.duplicates().to_vec(),
            ..SheetSummary::new(name)
        },
        ..SheetOutcome::default()
    };

    for (offset, row) in data.iter().enumerate() {
        let row_number = offset + 2;
        match process_row(name, row_number, row, &index, options.require_key_fields) {
            RowOutcome::Blank => outcome.summary.blank += 1,
            RowOutcome::Accepted(point) => {
                outcome.summary.accepted += 1;
                outcome.points.push(point);
            }
            RowOutcome::Rejected(report) => {
                log_warning(render_rejection(&report));
                outcome.summary.rejected += 1;
                outcome.rejected.push(report);
            }
        }
    }

    outcome
}
