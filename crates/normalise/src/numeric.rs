//! Coercion of raw cell values to numbers

// external crates
use x4tools_x4::Scalar;

/// Text values that mean "no value"
const MISSING: [&str; 3] = ["-", "NA", "N/A"];

/// Convert a raw cell to a finite number
///
/// Numbers pass through, numeric text is parsed, and blanks or the usual
/// placeholders (`-`, `NA`, `N/A`) become `None`. Anything that is not finite
/// (NaN, infinities) is also `None`, so it can never leak into the output.
///
/// ```rust
/// # use x4tools_normalise::to_number;
/// # use x4tools_x4::Scalar;
/// assert_eq!(to_number(&Scalar::from("3.14")), Some(3.14));
/// assert_eq!(to_number(&Scalar::from("-")), None);
/// assert_eq!(to_number(&Scalar::Number(f64::NAN)), None);
/// ```
pub fn to_number(value: &Scalar) -> Option<f64> {
    let number = match value {
        Scalar::Null => return None,
        Scalar::Number(number) => *number,
        Scalar::Text(text) => parse_number(text)?,
    };

    number.is_finite().then_some(number)
}

/// Parse numeric text, treating blanks and placeholders as missing
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || MISSING.contains(&text) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Scalar::from("3.14"), Some(3.14))]
    #[case(Scalar::from(" 2.5e3 "), Some(2500.0))]
    #[case(Scalar::from("-1"), Some(-1.0))]
    #[case(Scalar::Number(7.0), Some(7.0))]
    #[case(Scalar::from("-"), None)]
    #[case(Scalar::from("NA"), None)]
    #[case(Scalar::from("N/A"), None)]
    #[case(Scalar::from("   "), None)]
    #[case(Scalar::from("abc"), None)]
    #[case(Scalar::Null, None)]
    fn coercion(#[case] value: Scalar, #[case] expected: Option<f64>) {
        assert_eq!(to_number(&value), expected);
    }

    #[rstest]
    #[case(Scalar::Number(f64::NAN))]
    #[case(Scalar::Number(f64::INFINITY))]
    #[case(Scalar::Number(f64::NEG_INFINITY))]
    #[case(Scalar::from("nan"))]
    #[case(Scalar::from("inf"))]
    #[case(Scalar::from("-infinity"))]
    fn non_finite(#[case] value: Scalar) {
        assert_eq!(to_number(&value), None);
    }
}
