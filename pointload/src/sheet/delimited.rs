//! Delimited text (CSV/TSV) read as a one-sheet workbook.
//!
//! Encoding and delimiter are auto-detected. Rows keep their line position
//! so row numbers in diagnostics match what an editor shows.

use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::sheet::InMemorySheets;

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 always wins; otherwise the guess comes from `chardet`
/// (which handles GB2312/GBK exports from older spreadsheet tools).
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let (charset, _confidence, _language) = chardet::detect(bytes);
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "gb2312" | "gbk" | "gb18030" => "gb18030".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the given encoding label, dropping any BOM.
///
/// Unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let encoding =
        encoding_rs::Encoding::for_label(encoding.as_bytes()).unwrap_or(encoding_rs::UTF_8);
    let (decoded, _actual, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Defaults to `,` when none of the candidates appear.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best = DELIMITERS[0];
    let mut best_count = 0;
    for &candidate in &DELIMITERS {
        let count = first_line.matches(candidate).count();
        if count > best_count {
            best_count = count;
            best = candidate;
        }
    }
    best
}

/// Split delimited text into a grid of cells.
///
/// The grid is indexed by line: blank lines come back as empty rows
/// instead of being dropped. Rows may have different lengths.
pub fn parse_grid(content: &str, delimiter: char) -> SheetResult<Vec<Vec<String>>> {
    let delimiter = u8::try_from(delimiter).map_err(|_| SheetError::Read {
        sheet: String::new(),
        message: format!("delimiter {delimiter:?} is not a single byte"),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut grid: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(grid.len() + 1);
        while grid.len() + 1 < line {
            grid.push(Vec::new());
        }
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        grid.push(cells);
    }

    Ok(grid)
}

/// Read a delimited file as a workbook with one sheet named after the file.
pub fn read_delimited_file(path: &Path) -> SheetResult<InMemorySheets> {
    let bytes = std::fs::read(path).map_err(|e| SheetError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let sheet_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1");

    read_delimited_bytes(&bytes, sheet_name)
}

/// Same as [`read_delimited_file`] for bytes already in memory.
pub fn read_delimited_bytes(bytes: &[u8], sheet_name: &str) -> SheetResult<InMemorySheets> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    log::debug!(
        "delimited source '{}': encoding {}, delimiter {:?}",
        sheet_name,
        encoding,
        delimiter
    );

    let grid = parse_grid(&content, delimiter)?;
    Ok(InMemorySheets::new().with_sheet(sheet_name, grid))
}
