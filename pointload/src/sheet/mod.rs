//! Tabular sources: named sheets of text cells.
//!
//! - [`spreadsheet`] - Workbooks read through calamine
//! - [`delimited`] - CSV/TSV files as single-sheet workbooks
//! - [`InMemorySheets`] - Grids built in code
//!
//! [`open_workbook`] picks the reader from the file extension.

use std::path::Path;

use crate::error::{SheetError, SheetResult};

pub mod delimited;
pub mod spreadsheet;

pub use delimited::{read_delimited_bytes, read_delimited_file};
pub use spreadsheet::SpreadsheetSource;

/// Extensions read as delimited text.
const DELIMITED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// A source of named sheets.
pub trait SheetSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of a sheet, as text, starting at the first sheet row.
    ///
    /// Rows may have different lengths; an empty row has no cells.
    fn read_rows(&mut self, sheet: &str) -> SheetResult<Vec<Vec<String>>>;
}

// =============================================================================
// In-memory sheets
// =============================================================================

/// Sheets held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySheets {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl InMemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, builder style.
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        self.push_sheet(name, rows);
        self
    }

    pub fn push_sheet(&mut self, name: impl Into<String>, rows: Vec<Vec<String>>) {
        self.sheets.push((name.into(), rows));
    }
}

impl SheetSource for InMemorySheets {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_rows(&mut self, sheet: &str) -> SheetResult<Vec<Vec<String>>> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| SheetError::SheetNotFound(sheet.to_string()))
    }
}

// =============================================================================
// Workbook
// =============================================================================

/// Any supported file, opened.
pub enum Workbook {
    Spreadsheet(SpreadsheetSource),
    Delimited(InMemorySheets),
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        match self {
            Workbook::Spreadsheet(source) => source.sheet_names(),
            Workbook::Delimited(source) => source.sheet_names(),
        }
    }

    fn read_rows(&mut self, sheet: &str) -> SheetResult<Vec<Vec<String>>> {
        match self {
            Workbook::Spreadsheet(source) => source.read_rows(sheet),
            Workbook::Delimited(source) => source.read_rows(sheet),
        }
    }
}

/// Open a workbook file.
///
/// `.csv`, `.tsv` and `.txt` are read as delimited text; everything else
/// goes to calamine, which rejects formats it does not know.
pub fn open_workbook(path: &Path) -> SheetResult<Workbook> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
        read_delimited_file(path).map(Workbook::Delimited)
    } else {
        SpreadsheetSource::open(path).map(Workbook::Spreadsheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_in_memory_sheets_keep_order() {
        let mut sheets = InMemorySheets::new()
            .with_sheet("B", vec![row(&["x"])])
            .with_sheet("A", vec![]);
        assert_eq!(sheets.sheet_names(), vec!["B".to_string(), "A".to_string()]);
        assert_eq!(sheets.read_rows("B").unwrap(), vec![row(&["x"])]);
        assert!(matches!(
            sheets.read_rows("C"),
            Err(SheetError::SheetNotFound(name)) if name == "C"
        ));
    }

    #[test]
    fn test_open_workbook_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.CSV");
        std::fs::write(&path, "序号,点位编号\n1,1001\n").unwrap();

        let workbook = open_workbook(&path).unwrap();
        assert!(matches!(workbook, Workbook::Delimited(_)));
        assert_eq!(workbook.sheet_names(), vec!["points".to_string()]);
    }

    #[test]
    fn test_open_workbook_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.bin");
        std::fs::write(&path, b"not a workbook").unwrap();

        assert!(matches!(open_workbook(&path), Err(SheetError::Open { .. })));
    }
}
