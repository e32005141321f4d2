//! Spreadsheet workbooks (xlsx, xlsm, xlsb, xls, ods) via calamine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader, Sheets};

use crate::error::{SheetError, SheetResult};
use crate::sheet::SheetSource;

/// A workbook opened from disk.
pub struct SpreadsheetSource {
    sheets: Sheets<BufReader<File>>,
}

impl SpreadsheetSource {
    /// Open a workbook, detecting the format from the file extension.
    pub fn open(path: &Path) -> SheetResult<Self> {
        let sheets = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { sheets })
    }
}

impl SheetSource for SpreadsheetSource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_rows(&mut self, sheet: &str) -> SheetResult<Vec<Vec<String>>> {
        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| SheetError::Read {
                sheet: sheet.to_string(),
                message: e.to_string(),
            })?;
        Ok(grid_from_range(&range))
    }
}

/// Convert a cell range into text rows anchored at A1.
///
/// calamine ranges start at the first used cell; leading rows and columns
/// are padded back so row numbers match the sheet. Trailing empty cells
/// are dropped, so an empty row comes back with no cells at all.
pub fn grid_from_range(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells: Vec<String> = Vec::with_capacity(start_col as usize + row.len());
        cells.resize(start_col as usize, String::new());
        cells.extend(row.iter().map(cell_text));
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        grid.push(cells);
    }
    grid
}

/// Text of a cell as the sheet displays it.
///
/// Whole-number floats lose their `.0` so a point code typed as a number
/// reads `1001`, not `1001.0`. Date and time cells read as clock or
/// calendar text, never as their serial number.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(dt) => date_time_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Largest magnitude below which every whole f64 is exact (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn format_number(value: f64) -> String {
    if value.fract() != 0.0 {
        value.to_string()
    } else if value.abs() < MAX_EXACT_INTEGER {
        (value as i64).to_string()
    } else {
        // Digits past 2^53 are not the ones typed; show exponent form like Excel.
        format!("{:E}", value)
    }
}

fn date_time_text(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();
    if dt.is_duration() {
        let total = (serial.abs() * 86_400.0).round() as u64;
        let sign = if serial < 0.0 { "-" } else { "" };
        return format!("{}{}:{:02}:{:02}", sign, total / 3600, total / 60 % 60, total % 60);
    }
    match dt.as_datetime() {
        Some(at) if serial.abs() < 1.0 => at.format("%H:%M:%S").to_string(),
        Some(at) if serial.fract() == 0.0 => at.format("%Y-%m-%d").to_string(),
        Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{}d", format_number(serial)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{decode_frequency, decode_unsigned};
    use rust_xlsxwriter::{Format, Workbook};

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String(" 1s ".into())), " 1s ");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Float(1001.0)), "1001");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_text(&Data::Float(9_007_199_254_740_991.0)), "9007199254740991");
    }

    #[test]
    fn test_inexact_integer_float_not_read_as_digits() {
        let text = cell_text(&Data::Float(12_345_678_901_234_567_890.0));
        assert!(text.contains('E'), "got {text}");
        assert!(decode_unsigned("point code", &text).is_err());
    }

    #[test]
    fn test_date_and_time_cells_render_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.xlsx");

        let time = Format::new().set_num_format("hh:mm:ss");
        let date = Format::new().set_num_format("yyyy-mm-dd");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_number_with_format(0, 0, 1.0 / 86_400.0, &time).unwrap();
        sheet.write_number_with_format(0, 1, 0.5, &time).unwrap();
        sheet.write_number_with_format(0, 2, 45_306.0, &date).unwrap();
        workbook.save(&path).unwrap();

        let mut source = SpreadsheetSource::open(&path).unwrap();
        let rows = source.read_rows("Sheet1").unwrap();

        assert!(rows[0][0].contains(':'), "got {}", rows[0][0]);
        assert_eq!(rows[0][1], "12:00:00");
        assert_eq!(rows[0][2], "2024-01-15");

        // A time cell in the frequency column must not pass as a tiny duration.
        assert!(decode_frequency("sampling frequency", &rows[0][0]).is_err());
        assert!(decode_frequency("sampling frequency", &rows[0][1]).is_err());
        assert!(decode_unsigned("point code", &rows[0][2]).is_err());
    }

    #[test]
    fn test_grid_pads_leading_offset() {
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("序号".into()));
        range.set_value((1, 2), Data::String("点位编号".into()));
        range.set_value((2, 1), Data::Float(1.0));

        let grid = grid_from_range(&range);
        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1], vec!["", "序号", "点位编号"]);
        assert_eq!(grid[2], vec!["", "1"]);
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }

    #[test]
    fn test_open_xlsx_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.xlsx");

        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Line A").unwrap();
        first.write_string(0, 0, "点位编号").unwrap();
        first.write_string(0, 1, "采集频率").unwrap();
        first.write_number(1, 0, 1001.0).unwrap();
        first.write_string(1, 1, "500").unwrap();
        let second = workbook.add_worksheet();
        second.set_name("Line B").unwrap();
        workbook.save(&path).unwrap();

        let mut source = SpreadsheetSource::open(&path).unwrap();
        assert_eq!(source.sheet_names(), vec!["Line A".to_string(), "Line B".to_string()]);

        let rows = source.read_rows("Line A").unwrap();
        assert_eq!(rows[0], vec!["点位编号", "采集频率"]);
        assert_eq!(rows[1], vec!["1001", "500"]);
        assert!(source.read_rows("Line B").unwrap().is_empty());
        assert!(matches!(
            source.read_rows("Missing"),
            Err(SheetError::Read { .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = SpreadsheetSource::open(Path::new("/nonexistent/points.xlsx")).err().unwrap();
        assert!(matches!(err, SheetError::Open { .. }));
    }
}
