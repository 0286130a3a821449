//! Field classification primitives: null markers, numeric parsing, and the
//! compiled date/timestamp patterns.

use regex::Regex;
use std::sync::LazyLock;

/// Pattern for dates: 2-4 digit year, 1-2 digit month and day.
pub static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,4}-\d{1,2}-\d{1,2}$").expect("invalid date pattern"));

/// Pattern for timestamps: date followed by HH:MM:SS.
pub static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2,4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}$")
        .expect("invalid timestamp pattern")
});

/// A raw field that parsed as a signed decimal number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericValue {
    /// Parsed value.
    pub value: f64,
    /// Digits after the decimal point in the literal; 0 when none.
    pub scale: u32,
}

/// Check for null markers: empty, the two-character literal `""`, or `NULL`.
/// This is a hot path - called for every field.
#[inline]
pub fn is_null_marker(s: &str) -> bool {
    matches!(s, "" | "\"\"" | "NULL")
}

/// Parse a signed decimal number, returning its value and scale.
///
/// Accepts an optional sign, an integer part, an optional fractional part,
/// and an optional exponent. At least one mantissa digit is required. The
/// scale counts literal digits after the `.`, independent of any exponent.
/// Returns `None` for anything else, including `inf`/`NaN` spellings.
pub fn parse_numeric(s: &str) -> Option<NumericValue> {
    let bytes = s.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let mut int_digits = 0u32;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        int_digits += 1;
    }

    let mut scale = 0u32;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            scale += 1;
        }
    }

    if int_digits == 0 && scale == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let mut exp_digits = 0u32;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return None;
        }
    }

    if i != bytes.len() {
        return None;
    }

    let value = s.parse().ok()?;
    Some(NumericValue { value, scale })
}

/// Check for a date field (YYYY-MM-DD).
#[inline]
pub fn is_date(s: &str) -> bool {
    DATE_PATTERN.is_match(s)
}

/// Check for a timestamp field (YYYY-MM-DD HH:MM:SS).
#[inline]
pub fn is_timestamp(s: &str) -> bool {
    TIMESTAMP_PATTERN.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_markers() {
        assert!(is_null_marker(""));
        assert!(is_null_marker("\"\""));
        assert!(is_null_marker("NULL"));
        assert!(!is_null_marker("null"));
        assert!(!is_null_marker("N/A"));
        assert!(!is_null_marker("0"));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(
            parse_numeric("42"),
            Some(NumericValue {
                value: 42.0,
                scale: 0
            })
        );
        assert_eq!(parse_numeric("-7").unwrap().value, -7.0);
        assert_eq!(parse_numeric("+0").unwrap().scale, 0);
    }

    #[test]
    fn test_parse_fixed_point() {
        let n = parse_numeric("3.14").unwrap();
        assert_eq!(n.scale, 2);
        assert!((n.value - 3.14).abs() < f64::EPSILON);

        assert_eq!(parse_numeric("-0.5").unwrap().scale, 1);
        assert_eq!(parse_numeric(".25").unwrap().scale, 2);
        assert_eq!(parse_numeric("10.").unwrap().scale, 0);
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_numeric("1e5").unwrap().value, 100_000.0);
        assert_eq!(parse_numeric("2.5E-2").unwrap().scale, 1);
        assert_eq!(parse_numeric("1e"), None);
        assert_eq!(parse_numeric("e5"), None);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("-"), None);
        assert_eq!(parse_numeric("."), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12x"), None);
        assert_eq!(parse_numeric(" 12"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("1,000"), None);
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_date("2024-02-15"));
        assert!(is_date("99-1-1"));
        assert!(!is_date("2024-02-15 10:00:00"));
        assert!(!is_date("2024/02/15"));
        assert!(!is_date("15.02.2024"));
    }

    #[test]
    fn test_timestamp_pattern() {
        assert!(is_timestamp("2024-02-15 10:30:00"));
        assert!(is_timestamp("99-1-1 1:00:00"));
        assert!(!is_timestamp("2024-02-15"));
        assert!(!is_timestamp("2024-02-15T10:30:00"));
    }
}
