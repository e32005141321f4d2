//! Compound duration expressions.
//!
//! Parses text such as `500ms`, `1.5s`, `2h` or `1h30m` into signed
//! nanoseconds, and renders [`Duration`] values back in the same compact
//! form (`500ms`, `1.5s`, `2h0m0s`).
//!
//! Supported units: `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`.
//! A leading `+` or `-` applies to the whole expression.

use std::time::Duration;

use crate::error::DurationParseError;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

/// Largest magnitude accepted, matching a signed 64-bit nanosecond count.
const MAX_MAGNITUDE: u128 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration expression into signed nanoseconds.
///
/// `"0"` is the only value accepted without a unit.
///
/// # Example
/// ```
/// use pointload::mapping::duration::parse_duration;
///
/// assert_eq!(parse_duration("1.5s").unwrap(), 1_500_000_000);
/// assert_eq!(parse_duration("-5ms").unwrap(), -5_000_000);
/// assert!(parse_duration("500").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<i64, DurationParseError> {
    let invalid = || DurationParseError::Invalid(input.to_string());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        // Integer part.
        let int_len = leading_digits(rest);
        let (int_digits, after_int) = rest.split_at(int_len);
        let whole = parse_magnitude(int_digits).ok_or_else(invalid)?;
        rest = after_int;

        // Fraction part. Digits past what fits are ignored.
        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut frac_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            frac_len = leading_digits(after_dot);
            let (frac_digits, after_frac) = after_dot.split_at(frac_len);
            for digit in frac_digits.bytes() {
                if scale >= MAX_MAGNITUDE {
                    break;
                }
                fraction = fraction * 10 + u128::from(digit - b'0');
                scale *= 10;
            }
            rest = after_frac;
        }
        if int_len == 0 && frac_len == 0 {
            // A lone "." has no magnitude.
            return Err(invalid());
        }

        // Unit.
        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let (unit, after_unit) = rest.split_at(unit_len);
        let unit_size = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        rest = after_unit;

        let mut value = whole.checked_mul(unit_size).ok_or_else(invalid)?;
        if fraction > 0 {
            value += fraction * unit_size / scale;
        }
        if value > MAX_MAGNITUDE {
            return Err(invalid());
        }

        total += value;
        if total > MAX_MAGNITUDE {
            return Err(invalid());
        }
    }

    if negative {
        // -(1 << 63) is the one magnitude that only fits when negated.
        return Ok((-(total as i128)) as i64);
    }
    if total >= MAX_MAGNITUDE {
        return Err(invalid());
    }
    Ok(total as i64)
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_magnitude(digits: &str) -> Option<u128> {
    let mut value: u128 = 0;
    for digit in digits.bytes() {
        value = value * 10 + u128::from(digit - b'0');
        if value > MAX_MAGNITUDE {
            return None;
        }
    }
    Some(value)
}

/// Render a duration in compact unit form.
///
/// Sub-second values use the largest fitting unit (`1.5ms`, `250µs`);
/// longer values are spelled out in hours, minutes and seconds (`1m30s`,
/// `2h0m0s`). Fractions drop trailing zeros.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < SECOND {
        let (unit, size, precision) = if nanos < MICROSECOND {
            ("ns", NANOSECOND, 0)
        } else if nanos < MILLISECOND {
            ("µs", MICROSECOND, 3)
        } else {
            ("ms", MILLISECOND, 6)
        };
        return format!(
            "{}{}{}",
            nanos / size,
            fraction_suffix(nanos % size, precision),
            unit
        );
    }

    let whole_seconds = nanos / SECOND;
    let seconds = format!(
        "{}{}s",
        whole_seconds % 60,
        fraction_suffix(nanos % SECOND, 9)
    );
    let minutes = whole_seconds / 60;
    if minutes == 0 {
        return seconds;
    }
    let hours = minutes / 60;
    if hours == 0 {
        return format!("{}m{}", minutes, seconds);
    }
    format!("{}h{}m{}", hours, minutes % 60, seconds)
}

fn fraction_suffix(fraction: u128, precision: usize) -> String {
    if fraction == 0 || precision == 0 {
        return String::new();
    }
    let digits = format!("{:0width$}", fraction, width = precision);
    format!(".{}", digits.trim_end_matches('0'))
}

/// Serde helper that writes durations in [`format_duration`] form.
pub fn serialize_compact<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_duration(*duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(parse_duration("2s").unwrap(), 2_000_000_000);
        assert_eq!(parse_duration("3m").unwrap(), 180_000_000_000);
        assert_eq!(parse_duration("2h").unwrap(), 7_200_000_000_000);
        assert_eq!(parse_duration("15us").unwrap(), 15_000);
        assert_eq!(parse_duration("15µs").unwrap(), 15_000);
        assert_eq!(parse_duration("7ns").unwrap(), 7);
    }

    #[test]
    fn test_parse_decimals_and_compounds() {
        assert_eq!(parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(parse_duration("1.5h").unwrap(), 5_400_000_000_000);
        assert_eq!(parse_duration(".5s").unwrap(), 500_000_000);
        assert_eq!(parse_duration("1.s").unwrap(), 1_000_000_000);
        assert_eq!(parse_duration("1h30m").unwrap(), 5_400_000_000_000);
        assert_eq!(parse_duration("1m0.25s").unwrap(), 60_250_000_000);
    }

    #[test]
    fn test_parse_signs_and_zero() {
        assert_eq!(parse_duration("0").unwrap(), 0);
        assert_eq!(parse_duration("-0").unwrap(), 0);
        assert_eq!(parse_duration("0ms").unwrap(), 0);
        assert_eq!(parse_duration("-5ms").unwrap(), -5_000_000);
        assert_eq!(parse_duration("+5ms").unwrap(), 5_000_000);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_duration(""),
            Err(DurationParseError::Invalid(String::new()))
        );
        assert_eq!(
            parse_duration("abcms"),
            Err(DurationParseError::Invalid("abcms".into()))
        );
        assert_eq!(
            parse_duration("500"),
            Err(DurationParseError::MissingUnit("500".into()))
        );
        assert_eq!(
            parse_duration("5d"),
            Err(DurationParseError::UnknownUnit {
                unit: "d".into(),
                input: "5d".into()
            })
        );
        assert!(parse_duration(".s").is_err());
        assert!(parse_duration("1 s").is_err());
        assert!(parse_duration("99999999999999999999h").is_err());
    }

    #[test]
    fn test_format_sub_second() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(7)), "7ns");
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.5ms");
    }

    #[test]
    fn test_format_seconds_and_up() {
        assert_eq!(format_duration(Duration::from_secs(1)), "1s");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(7_200)), "2h0m0s");
        assert_eq!(format_duration(Duration::from_millis(5_400_250)), "1h30m0.25s");
    }
}
