//! Fixed-point token units
//!
//! Converts between user-entered decimal strings and the integer amounts the
//! contracts work with. A token with `decimals = 18` stores `1.5` as
//! `1_500_000_000_000_000_000`.
//!
//! ## Critical Rules
//!
//! 1. **NO FLOATING POINT**: amounts never pass through f32/f64
//! 2. **Preserve Native Precision**: the scale is the token's own decimal count
//! 3. **Reject, don't round**: surplus fractional digits are an error unless
//!    they are trailing zeros

use crate::common::errors::UnitsError;
use ethereum_types::U256;

/// Decimal count used by the pool contracts and LP tokens
pub const DEFAULT_DECIMALS: u8 = 18;

/// Largest `decimals` for which `10^decimals` fits in a `U256`
pub const MAX_DECIMALS: u8 = 77;

/// `10^decimals` as a `U256`
pub fn pow10(decimals: u8) -> Result<U256, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals {
            decimals,
            max: MAX_DECIMALS,
        });
    }
    Ok(U256::exp10(decimals as usize))
}

/// Parse a decimal string into the token's smallest unit
///
/// Accepts `123`, `1.5`, `.5` and `5.`, surrounded by optional whitespace.
///
/// # Examples
/// ```
/// use swap_types::{parse_units, U256};
///
/// assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000u64));
/// assert!(parse_units("-1", 6).is_err());
/// ```
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, UnitsError> {
    pow10(decimals)?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::Invalid {
            input: input.to_string(),
        });
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(UnitsError::ExcessPrecision {
            input: input.to_string(),
            decimals,
        });
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(decimals as usize - fraction.len()));

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(significant).map_err(|_| UnitsError::Overflow {
        input: input.to_string(),
    })
}

/// Render a smallest-unit amount as a decimal string
///
/// Trailing fractional zeros are dropped, so whole amounts have no dot.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let scale = decimals as usize;
    if scale == 0 {
        return digits;
    }

    let (whole, fraction) = if digits.len() > scale {
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        (whole.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), format!("{}{}", "0".repeat(scale - digits.len()), digits))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_units("20", 0).unwrap(), U256::from(20u64));
        assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(
            parse_units("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_units(".5", 2).unwrap(), U256::from(50u64));
        assert_eq!(parse_units("5.", 2).unwrap(), U256::from(500u64));
        assert_eq!(parse_units("  7 ", 1).unwrap(), U256::from(70u64));
        assert_eq!(parse_units("000", 18).unwrap(), U256::zero());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_units("", 18), Err(UnitsError::Empty));
        assert_eq!(parse_units("   ", 18), Err(UnitsError::Empty));
        assert!(matches!(parse_units("-1", 18), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_units("+1", 18), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_units("1.2.3", 18), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_units("abc", 18), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_units(".", 18), Err(UnitsError::Invalid { .. })));
        assert!(matches!(parse_units("1e18", 18), Err(UnitsError::Invalid { .. })));
    }

    #[test]
    fn test_parse_precision_limits() {
        assert!(matches!(
            parse_units("0.123", 2),
            Err(UnitsError::ExcessPrecision { decimals: 2, .. })
        ));
        // Surplus zeros carry no value
        assert_eq!(parse_units("0.1200", 2).unwrap(), U256::from(12u64));
        assert!(matches!(
            parse_units("1", 78),
            Err(UnitsError::UnsupportedDecimals { decimals: 78, .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_units(&max, 0).unwrap(), U256::MAX);
        assert!(matches!(parse_units(&max, 1), Err(UnitsError::Overflow { .. })));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(20u64), 0), "20");
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(2_000_000u64), 6), "2");
        assert_eq!(format_units(U256::one(), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::zero(), 18), "0");
    }

    #[test]
    fn test_format_parse_agree_on_display_strings() {
        for text in ["0.5", "1234.000001", "42"] {
            let value = parse_units(text, 6).unwrap();
            assert_eq!(format_units(value, 6), text);
        }
    }
}
