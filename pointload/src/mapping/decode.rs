//! Per-field decoding.
//!
//! [`decode_field`] resolves one [`FieldSpec`] against a row and writes the
//! decoded value into the point. Missing columns and short rows leave the
//! field at its default unless `require_key_fields` is set.

use std::time::Duration;

use crate::error::{FieldError, FieldResult};
use crate::mapping::duration::parse_duration;
use crate::mapping::fields::{FieldKind, FieldSpec};
use crate::mapping::header::HeaderIndex;
use crate::models::Point;

/// Characters that mark a cell as already carrying a unit.
const UNIT_MARKERS: &[char] = &['n', 's', 'u', 'µ', 'm', 'h'];

/// Unit appended to bare magnitudes.
const DEFAULT_UNIT: &str = "ms";

/// Decode one field of `row` into `point`.
///
/// The cell is located through `index`. When the header lacks the label,
/// or the row ends before that column, nothing is written and `Ok(())` is
/// returned, except for key fields with `require_key_fields` set.
pub fn decode_field(
    spec: &FieldSpec,
    row: &[String],
    index: &HeaderIndex,
    require_key_fields: bool,
    point: &mut Point,
) -> FieldResult<()> {
    let cell = index.get(spec.label).and_then(|column| row.get(column));
    let Some(cell) = cell else {
        if require_key_fields && spec.is_key() {
            return Err(FieldError::Missing { field: spec.name });
        }
        return Ok(());
    };
    let value = cell.trim();

    match spec.kind {
        FieldKind::PlainText(set) => set(point, value.to_string()),
        FieldKind::UnsignedInteger(set) => set(point, decode_unsigned(spec.name, value)?),
        FieldKind::DurationWithUnitInference(set) => {
            set(point, decode_frequency(spec.name, value)?)
        }
    }
    Ok(())
}

/// Strict base-10 `u64`: digits only, no sign, no separators.
pub fn decode_unsigned(field: &'static str, value: &str) -> FieldResult<u64> {
    if value.is_empty() {
        return Err(FieldError::Empty { field });
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::InvalidInteger {
            field,
            reason: format!("invalid digit found in {value:?}"),
        });
    }
    value.parse::<u64>().map_err(|e| FieldError::InvalidInteger {
        field,
        reason: format!("{e}: {value:?}"),
    })
}

/// Duration with unit inference; zero and negative values are rejected.
pub fn decode_frequency(field: &'static str, value: &str) -> FieldResult<Duration> {
    if value.is_empty() {
        return Err(FieldError::Empty { field });
    }

    let expression = with_inferred_unit(value);
    let nanos = parse_duration(&expression).map_err(|source| FieldError::InvalidDuration {
        field,
        raw: value.to_string(),
        source,
    })?;
    if nanos <= 0 {
        return Err(FieldError::NotPositive { field });
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Append `ms` to cells that carry no unit.
///
/// # Example
/// ```
/// use pointload::mapping::with_inferred_unit;
///
/// assert_eq!(with_inferred_unit("500"), "500ms");
/// assert_eq!(with_inferred_unit("1.5h"), "1.5h");
/// ```
pub fn with_inferred_unit(value: &str) -> String {
    let lower = value.to_lowercase();
    let has_unit = value.contains(UNIT_MARKERS) || lower.ends_with("ms") || lower.ends_with('s');
    if has_unit {
        value.to_string()
    } else {
        format!("{value}{DEFAULT_UNIT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::fields::field_for_label;
    use crate::mapping::header::HeaderCollision;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn spec(label: &str) -> &'static FieldSpec {
        field_for_label(label).unwrap()
    }

    #[test]
    fn test_unit_inference() {
        assert_eq!(with_inferred_unit("500"), "500ms");
        assert_eq!(with_inferred_unit("1.5"), "1.5ms");
        assert_eq!(with_inferred_unit("2s"), "2s");
        assert_eq!(with_inferred_unit("2S"), "2S");
        assert_eq!(with_inferred_unit("1h30m"), "1h30m");
        assert_eq!(with_inferred_unit("-5ms"), "-5ms");
        assert_eq!(with_inferred_unit("abc"), "abcms");
    }

    #[test]
    fn test_frequency_bare_number_is_milliseconds() {
        assert_eq!(
            decode_frequency("sampling frequency", "500").unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_frequency_explicit_units() {
        assert_eq!(
            decode_frequency("sampling frequency", "2s").unwrap(),
            Duration::from_secs(2)
        );
        assert_eq!(
            decode_frequency("sampling frequency", "1.5h").unwrap(),
            Duration::from_secs(5_400)
        );
    }

    #[test]
    fn test_frequency_rejections() {
        let field = "sampling frequency";
        assert_eq!(decode_frequency(field, ""), Err(FieldError::Empty { field }));
        assert_eq!(decode_frequency(field, "0"), Err(FieldError::NotPositive { field }));
        assert_eq!(decode_frequency(field, "0ms"), Err(FieldError::NotPositive { field }));
        assert_eq!(decode_frequency(field, "-5ms"), Err(FieldError::NotPositive { field }));

        let err = decode_frequency(field, "abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "sampling frequency parse failed: invalid duration \"abcms\" → abc"
        );
    }

    #[test]
    fn test_unsigned() {
        let field = "point code";
        assert_eq!(decode_unsigned(field, "1001"), Ok(1001));
        assert_eq!(decode_unsigned(field, "18446744073709551615"), Ok(u64::MAX));
        assert_eq!(decode_unsigned(field, ""), Err(FieldError::Empty { field }));
        assert!(decode_unsigned(field, "abc").is_err());
        assert!(decode_unsigned(field, "+12").is_err());
        assert!(decode_unsigned(field, "-1").is_err());
        assert!(decode_unsigned(field, "12.0").is_err());

        let overflow = decode_unsigned(field, "18446744073709551616").unwrap_err();
        assert!(overflow.to_string().starts_with("point code invalid:"));
    }

    #[test]
    fn test_decode_field_trims_and_sets() {
        let header = strings(&["点位名称", "点位编号", "采集频率"]);
        let index = HeaderIndex::build(&header, HeaderCollision::LastWins);
        let row = strings(&["  TempSensor1 ", " 1001 ", " 2s "]);
        let mut point = Point::default();

        for label in ["点位名称", "点位编号", "采集频率"] {
            decode_field(spec(label), &row, &index, false, &mut point).unwrap();
        }
        assert_eq!(point.point_name, "TempSensor1");
        assert_eq!(point.point_code, 1001);
        assert_eq!(point.sampling_frequency, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_column_and_short_row_are_tolerated() {
        let header = strings(&["点位名称", "点位编号"]);
        let index = HeaderIndex::build(&header, HeaderCollision::LastWins);
        let short_row = strings(&["TempSensor1"]);
        let mut point = Point::default();

        decode_field(spec("点位编号"), &short_row, &index, false, &mut point).unwrap();
        decode_field(spec("采集频率"), &short_row, &index, false, &mut point).unwrap();
        assert_eq!(point.point_code, 0);
        assert_eq!(point.sampling_frequency, Duration::ZERO);
    }

    #[test]
    fn test_required_key_fields() {
        let header = strings(&["点位名称"]);
        let index = HeaderIndex::build(&header, HeaderCollision::LastWins);
        let row = strings(&["TempSensor1"]);
        let mut point = Point::default();

        assert_eq!(
            decode_field(spec("点位编号"), &row, &index, true, &mut point),
            Err(FieldError::Missing { field: "point code" })
        );
        // Plain text stays optional.
        assert!(decode_field(spec("区域"), &row, &index, true, &mut point).is_ok());
    }
}
