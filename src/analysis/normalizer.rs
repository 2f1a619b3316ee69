//! Fixed-point normalizer.
//!
//! Three conversions share one parser:
//! - [`try_to_decimal`] reports every failure.
//! - [`to_decimal`] swallows failures as zero (bulk series where a gap must not abort the run).
//! - [`to_optional_decimal`] keeps "absent" distinct from zero (slippage).

use std::str::FromStr;

use bigdecimal::BigDecimal;
use itertools::Itertools;
use thiserror::Error;

use crate::config::FIXED_POINT;
use crate::domain::{Alignment, FixedPointScale, FixedPointValue};

/// Why a single raw value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("empty string is not a fixed-point amount")]
    Empty,

    #[error("'{input}' is not a decimal number: {reason}")]
    Malformed { input: String, reason: String },

    #[error("'{input}' is out of range for scale {scale}")]
    OutOfRange { input: String, scale: FixedPointScale },
}

/// Strict conversion of one raw amount.
///
/// `Ok(None)` means the value is absent (JSON null or the literal `"null"`).
/// Surrounding whitespace, a sign, a fraction and an exponent are accepted.
pub fn try_to_decimal(
    raw: Option<&str>,
    scale: FixedPointScale,
) -> Result<Option<FixedPointValue>, ConversionError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let text = raw.trim();
    if text == FIXED_POINT.null_literal {
        return Ok(None);
    }
    if text == "0" {
        return Ok(Some(FixedPointValue::zero()));
    }
    if text.is_empty() {
        return Err(ConversionError::Empty);
    }

    let parsed = BigDecimal::from_str(text).map_err(|e| ConversionError::Malformed {
        input: raw.to_string(),
        reason: e.to_string(),
    })?;

    let value = scale
        .descale(parsed)
        .ok_or_else(|| ConversionError::OutOfRange {
            input: raw.to_string(),
            scale,
        })?;

    Ok(Some(FixedPointValue::from_decimal(value)))
}

/// Lossy conversion: null, `"0"` and anything unparseable all become 0.
///
/// A returned zero is therefore ambiguous between "truly zero" and "bad data".
/// Use [`try_to_decimal`] when the difference matters.
pub fn to_decimal(raw: Option<&str>, scale: FixedPointScale) -> FixedPointValue {
    try_to_decimal(raw, scale)
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Like [`to_decimal`], but null, the literal `"null"` and parse failures are absent
/// rather than zero. `"0"` stays a present zero.
pub fn to_optional_decimal(raw: Option<&str>, scale: FixedPointScale) -> Option<FixedPointValue> {
    try_to_decimal(raw, scale).ok().flatten()
}

/// Common width of `rows`, or the misaligned sentinel (`width = 0`, `ok = false`)
/// if any two rows differ. No rows at all is trivially aligned with width 0.
pub fn align_series<T>(rows: &[Vec<T>]) -> Alignment {
    match rows.iter().map(Vec::len).all_equal_value() {
        Ok(width) => Alignment::aligned(width),
        Err(None) => Alignment::aligned(0),
        Err(Some(_)) => Alignment::misaligned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::num_bigint::BigInt;
    use quickcheck_macros::quickcheck;

    const WEI: FixedPointScale = FixedPointScale::WEI;

    fn dec(s: &str) -> FixedPointValue {
        FixedPointValue::from_decimal(BigDecimal::from_str(s).unwrap())
    }

    #[test]
    fn null_and_zero_are_zero() {
        assert_eq!(to_decimal(None, WEI), FixedPointValue::zero());
        assert_eq!(to_decimal(Some("0"), WEI), FixedPointValue::zero());
    }

    #[test]
    fn malformed_is_zero() {
        for raw in ["", "abc", "12abc", "NaN", "true", "0x10", "null"] {
            assert_eq!(to_decimal(Some(raw), WEI), FixedPointValue::zero(), "{raw:?}");
        }
    }

    #[test]
    fn one_token() {
        assert_eq!(to_decimal(Some("1000000000000000000"), WEI), dec("1"));
        assert_eq!(to_decimal(Some("10000000000000000"), WEI), dec("0.01"));
        assert_eq!(to_decimal(Some("1"), WEI), dec("0.000000000000000001"));
    }

    #[test]
    fn sign_whitespace_and_exponent_are_accepted() {
        assert_eq!(to_decimal(Some("-2000000000000000000"), WEI), dec("-2"));
        assert_eq!(to_decimal(Some(" 3000000000000000000\n"), WEI), dec("3"));
        assert_eq!(to_decimal(Some("1.5e18"), WEI), dec("1.5"));
    }

    #[test]
    fn optional_distinguishes_absent_from_zero() {
        assert_eq!(to_optional_decimal(None, WEI), None);
        assert_eq!(to_optional_decimal(Some("null"), WEI), None);
        assert_eq!(to_optional_decimal(Some("garbage"), WEI), None);
        assert_eq!(to_optional_decimal(Some("0"), WEI), Some(FixedPointValue::zero()));
        assert_eq!(
            to_optional_decimal(Some("10000000000000000"), WEI),
            Some(dec("0.01"))
        );
    }

    #[test]
    fn strict_conversion_reports_failures() {
        assert_eq!(try_to_decimal(Some("  "), WEI), Err(ConversionError::Empty));
        assert!(matches!(
            try_to_decimal(Some("1,000"), WEI),
            Err(ConversionError::Malformed { .. })
        ));
        assert_eq!(try_to_decimal(Some("null"), WEI), Ok(None));
    }

    #[test]
    fn exponent_bomb_is_out_of_range() {
        assert!(matches!(
            try_to_decimal(Some("1e100000000"), WEI),
            Err(ConversionError::OutOfRange { .. })
        ));
        assert_eq!(to_decimal(Some("1e100000000"), WEI), FixedPointValue::zero());
        assert_eq!(to_optional_decimal(Some("-1e-100000000"), WEI), None);
    }

    #[test]
    fn other_scales() {
        let usdc = FixedPointScale::from_decimals(6);
        assert_eq!(to_decimal(Some("2500000"), usdc), dec("2.5"));
        let unscaled = FixedPointScale::from_decimals(0);
        assert_eq!(to_decimal(Some("42"), unscaled), dec("42"));
    }

    #[test]
    fn alignment() {
        let even = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        assert_eq!(align_series(&even), Alignment::aligned(2));

        let ragged = vec![vec![1, 2], vec![3]];
        assert_eq!(align_series(&ragged), Alignment { width: 0, ok: false });

        let empty: Vec<Vec<u8>> = Vec::new();
        assert_eq!(align_series(&empty), Alignment::aligned(0));
    }

    #[quickcheck]
    fn exact_for_machine_integers(raw: i128, decimals: u8) -> bool {
        let scale = FixedPointScale::from_decimals(u32::from(decimals % 40));
        let expected = BigDecimal::new(BigInt::from(raw), i64::from(scale.decimals()));
        to_decimal(Some(&raw.to_string()), scale).into_decimal() == expected
    }

    #[quickcheck]
    fn exact_for_any_magnitude(limbs: Vec<u64>, negative: bool) -> bool {
        // Concatenating limbs builds integers far beyond any fixed-width type
        let mut digits: String = limbs.iter().map(|l| l.to_string()).collect();
        if digits.is_empty() {
            digits.push('7');
        }
        if negative {
            digits.insert(0, '-');
        }
        let integer = BigInt::from_str(&digits).unwrap();
        let exact = BigDecimal::new(integer, 18);
        to_decimal(Some(&digits), WEI).into_decimal() == exact
    }

    #[quickcheck]
    fn optional_agrees_with_lossy_on_valid_input(raw: i64) -> bool {
        let text = raw.to_string();
        to_optional_decimal(Some(&text), WEI) == Some(to_decimal(Some(&text), WEI))
    }
}
