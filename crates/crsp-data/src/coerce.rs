//! Lenient numeric parsing.
//!
//! CRSP marks special return values with letter codes (`B`, `C`, `E`, ...)
//! and leaves blanks for missing data. Anything that does not parse as a
//! number becomes `None`.

/// Parse a float, mapping blanks, letter codes and non-finite values to `None`.
pub fn coerce_f64(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer code. Values written as floats (`10.0`) are accepted when
/// they carry no fractional part.
pub fn coerce_i64(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>().ok().or_else(|| {
        coerce_f64(raw)
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.0123", Some(0.0123))]
    #[case(" -0.5 ", Some(-0.5))]
    #[case("", None)]
    #[case("C", None)]
    #[case("B", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn test_coerce_f64(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(coerce_f64(raw), expected);
    }

    #[rstest]
    #[case("10", Some(10))]
    #[case("11.0", Some(11))]
    #[case("10.5", None)]
    #[case("", None)]
    #[case("A", None)]
    fn test_coerce_i64(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(coerce_i64(raw), expected);
    }
}
