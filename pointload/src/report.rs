//! Human-readable rendering of a [`LoadReport`].

use std::fmt::Write as _;

use crate::mapping::format_duration;
use crate::models::{Point, RowReport, SheetSkip};
use crate::pipeline::LoadReport;

/// One line for a dropped row.
///
/// ```text
/// Sheet[Line A] row 3 errors: ["point code is empty"]
/// ```
pub fn render_rejection(report: &RowReport) -> String {
    format!(
        "Sheet[{}] row {} errors: {:?}",
        report.sheet_name,
        report.row_number,
        report.messages()
    )
}

/// One line for an accepted point. `ordinal` starts at 1.
pub fn render_point(ordinal: usize, point: &Point) -> String {
    format!(
        "[{:4}] {} | code={} | frequency={} | store={} publish={}",
        ordinal,
        point.point_name,
        point.point_code,
        format_duration(point.sampling_frequency),
        point.need_store,
        point.need_publish,
    )
}

/// Per-sheet counters, one line each.
pub fn render_sheets(report: &LoadReport) -> String {
    let mut out = String::new();
    for sheet in &report.sheets {
        let _ = match &sheet.skipped {
            Some(SheetSkip::NoDataRows) => writeln!(out, "  {}: no data rows", sheet.name),
            Some(SheetSkip::Unreadable(reason)) => {
                writeln!(out, "  {}: unreadable ({})", sheet.name, reason)
            }
            None => writeln!(
                out,
                "  {}: {} rows, {} valid, {} rejected, {} blank",
                sheet.name, sheet.data_rows, sheet.accepted, sheet.rejected, sheet.blank
            ),
        };
    }
    out
}

/// The final summary: valid count followed by every point.
pub fn render_summary(report: &LoadReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Parsed {} valid points", report.valid_count());
    let _ = writeln!(out);
    for (i, point) in report.points.iter().enumerate() {
        let _ = writeln!(out, "{}", render_point(i + 1, point));
    }
    out
}
