//! Real-number parsing and formatting.
//!
//! MCNP accepts both standard exponent notation (`1.5e-3`) and the
//! FORTRAN-style form with the `e` elided (`1.5-3`). Formatting always emits
//! the standard form, so round-tripping normalizes FORTRAN exponents.

use crate::error::ValueError;

/// Parse an MCNP real token.
///
/// Accepts anything `f64::from_str` accepts except `inf`/`nan` spellings,
/// plus FORTRAN exponents: a mantissa immediately followed by a signed
/// integer exponent with no `e` separator (`1.5-3`, `2+2`, `-1.-1`).
pub fn parse_real(text: &str) -> Result<f64, ValueError> {
    if let Ok(v) = text.parse::<f64>() {
        // `f64::from_str` accepts "inf"/"NaN", which are not INP syntax.
        if v.is_finite() && !text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
        {
            return Ok(v);
        }
        return Err(ValueError::new("real", text));
    }

    // FORTRAN exponent: split at the last interior sign that is not itself
    // the start of the mantissa and not preceded by `e`.
    if let Some(idx) = text.char_indices().rev().find_map(|(i, c)| {
        (i > 0 && (c == '+' || c == '-') && is_mantissa_end(&text[..i])).then_some(i)
    })
    {
        let (mantissa, exponent) = text.split_at(idx);
        if let (Ok(m), Ok(e)) = (mantissa.parse::<f64>(), exponent.parse::<i32>()) {
            let v = m * 10f64.powi(e);
            if v.is_finite() {
                return Ok(v);
            }
        }
    }

    Err(ValueError::new("real", text))
}

/// The text before a candidate exponent sign must end in a digit or a
/// decimal point for the sign to start a FORTRAN exponent.
fn is_mantissa_end(prefix: &str) -> bool {
    prefix
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
}

/// Canonical formatting for a real value.
///
/// Uses Rust's shortest round-trip representation, which re-parses to the
/// identical `f64`.
pub fn format_real(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_standard_notation() {
        assert_approx_eq!(f64, parse_real("1.5").unwrap(), 1.5);
        assert_approx_eq!(f64, parse_real("-3.5").unwrap(), -3.5);
        assert_approx_eq!(f64, parse_real("1.5e-3").unwrap(), 0.0015);
        assert_approx_eq!(f64, parse_real("2E2").unwrap(), 200.0);
        assert_approx_eq!(f64, parse_real(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_fortran_exponent() {
        assert_approx_eq!(f64, parse_real("1.5-3").unwrap(), 0.0015);
        assert_approx_eq!(f64, parse_real("2+2").unwrap(), 200.0);
        assert_approx_eq!(f64, parse_real("-1.5-3").unwrap(), -0.0015);
        assert_approx_eq!(f64, parse_real("6.022+23").unwrap(), 6.022e23);
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(parse_real("abc").is_err());
        assert!(parse_real("1001.70c").is_err());
        assert!(parse_real("inf").is_err());
        assert!(parse_real("nan").is_err());
        assert!(parse_real("--3").is_err());
        assert!(parse_real("").is_err());
    }

    #[test]
    fn test_round_trip() {
        for v in [0.0, 1.5, -3.5, 0.0015, 6.022e23, -1.0e-9] {
            assert_eq!(parse_real(&format_real(v)).unwrap(), v);
        }
    }

    proptest::proptest! {
        #[test]
        fn prop_round_trip_finite(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let text = format_real(v);
            proptest::prop_assert_eq!(parse_real(&text).unwrap(), v);
        }
    }
}
