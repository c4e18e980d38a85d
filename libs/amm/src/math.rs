//! Checked helpers for 512-bit intermediates

use crate::errors::AmmError;
use swap_types::{U256, U512};

/// Narrow a 512-bit result back to 256 bits
pub fn narrow(value: U512, context: &'static str) -> Result<U256, AmmError> {
    let words = value.0;
    if words[4..].iter().any(|word| *word != 0) {
        return Err(AmmError::Overflow { context });
    }
    Ok(U256([words[0], words[1], words[2], words[3]]))
}

/// `a * b / c` with the product held in 512 bits, truncating
pub fn mul_div(a: U256, b: U256, c: U256, context: &'static str) -> Result<U256, AmmError> {
    if c.is_zero() {
        return Err(AmmError::DivisionByZero { context });
    }
    narrow(a.full_mul(b) / U512::from(c), context)
}

/// `difference * 10000 / larger`, 0 when `larger` is 0
pub fn basis_points(difference: U512, larger: U512) -> u64 {
    if larger.is_zero() {
        return 0;
    }
    match difference.checked_mul(U512::from(10_000u64)) {
        Some(scaled) => (scaled / larger).low_u64(),
        // difference is already beyond 2^498, so larger is too; divide first
        None => (difference / (larger / U512::from(10_000u64))).low_u64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_bounds() {
        assert_eq!(narrow(U512::from(U256::MAX), "max").unwrap(), U256::MAX);
        let too_big = U512::from(U256::MAX) + U512::one();
        assert_eq!(
            narrow(too_big, "max+1"),
            Err(AmmError::Overflow { context: "max+1" })
        );
    }

    #[test]
    fn test_mul_div_wide_product() {
        // MAX * 2 / 4 only fits because the product is held in 512 bits
        let result = mul_div(U256::MAX, U256::from(2u64), U256::from(4u64), "wide").unwrap();
        assert_eq!(result, U256::MAX / 2);
    }

    #[test]
    fn test_mul_div_zero_divisor() {
        assert_eq!(
            mul_div(U256::one(), U256::one(), U256::zero(), "zero"),
            Err(AmmError::DivisionByZero { context: "zero" })
        );
    }

    #[test]
    fn test_basis_points() {
        assert_eq!(basis_points(U512::from(1u64), U512::from(1000u64)), 10);
        assert_eq!(basis_points(U512::from(5u64), U512::zero()), 0);
        assert_eq!(basis_points(U512::zero(), U512::from(7u64)), 0);
    }
}
