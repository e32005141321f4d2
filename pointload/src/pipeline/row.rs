//! One data row → one [`Point`] or one [`RowReport`].

use crate::mapping::{decode_field, HeaderIndex, FIELDS};
use crate::models::{Point, RowReport};

/// What became of a data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// No cells, or only empty ones.
    Blank,
    Accepted(Point),
    Rejected(RowReport),
}

/// Map and validate a single data row.
///
/// `row_number` is the 1-based sheet row (the header is row 1). Every
/// field is decoded even after a failure so the report lists all problems
/// at once; any failure drops the whole point.
pub fn process_row(
    sheet_name: &str,
    row_number: usize,
    row: &[String],
    index: &HeaderIndex,
    require_key_fields: bool,
) -> RowOutcome {
    if row.iter().all(String::is_empty) {
        return RowOutcome::Blank;
    }

    let mut point = Point::at(sheet_name, row_number);
    let errors: Vec<_> = FIELDS
        .iter()
        .filter_map(|spec| decode_field(spec, row, index, require_key_fields, &mut point).err())
        .collect();

    if errors.is_empty() {
        RowOutcome::Accepted(point)
    } else {
        RowOutcome::Rejected(RowReport {
            sheet_name: sheet_name.to_string(),
            row_number,
            errors,
        })
    }
}
