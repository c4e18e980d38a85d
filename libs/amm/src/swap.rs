//! Constant-product swap preview with exact integer math
//!
//! Estimates what a swap would return before the user submits it. The pool
//! contract computes the real output; this is a preview only.

use crate::errors::AmmError;
use crate::math::{basis_points, narrow};
use rust_decimal::Decimal;
use swap_types::{ReservePair, U256, U512};

/// Basis-point denominator for fees and impact
pub const FEE_DENOMINATOR: u32 = 10_000;

/// Which side of the pair is sold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

/// Expected result of a swap against current reserves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPreview {
    pub direction: SwapDirection,
    pub amount_in: U256,
    pub amount_out: U256,
    pub fee_bps: u32,
    pub price_impact_bps: u64,
}

impl SwapPreview {
    pub fn price_impact_percent(&self) -> Decimal {
        Decimal::new(self.price_impact_bps as i64, 2)
    }
}

/// Output amount for the x*y=k formula
///
/// `out = in*(10000-fee)*r_out / (r_in*10000 + in*(10000-fee))`
pub fn estimate_output(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee_bps: u32,
) -> Result<U256, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::ZeroInput);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    if fee_bps >= FEE_DENOMINATOR {
        return Err(AmmError::InvalidFee { fee_bps });
    }

    let in_after_fee = amount_in.full_mul(U256::from(FEE_DENOMINATOR - fee_bps));
    let numerator = in_after_fee
        .checked_mul(U512::from(reserve_out))
        .ok_or(AmmError::Overflow {
            context: "swap numerator",
        })?;
    let denominator = reserve_in
        .full_mul(U256::from(FEE_DENOMINATOR))
        .checked_add(in_after_fee)
        .ok_or(AmmError::Overflow {
            context: "swap denominator",
        })?;

    narrow(numerator / denominator, "swap output")
}

/// Price movement caused by a fee-less trade of `amount_in`, in basis points
pub fn price_impact_bps(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
) -> Result<u64, AmmError> {
    let amount_out = estimate_output(amount_in, reserve_in, reserve_out, 0)?;

    // price_before = r_out / r_in, price_after = (r_out - out) / (r_in + in);
    // compare cross-multiplied to stay in integers
    let before = reserve_out
        .full_mul(reserve_in.checked_add(amount_in).ok_or(AmmError::Overflow {
            context: "impact reserves",
        })?);
    let after = (reserve_out - amount_out).full_mul(reserve_in);

    Ok(basis_points(before - after, before))
}

/// Preview a swap of `amount_in` in the given direction
pub fn preview_swap(
    reserves: &ReservePair,
    amount_in: U256,
    direction: SwapDirection,
    fee_bps: u32,
) -> Result<SwapPreview, AmmError> {
    let (reserve_in, reserve_out) = match direction {
        SwapDirection::AToB => (reserves.reserve_a, reserves.reserve_b),
        SwapDirection::BToA => (reserves.reserve_b, reserves.reserve_a),
    };

    Ok(SwapPreview {
        direction,
        amount_in,
        amount_out: estimate_output(amount_in, reserve_in, reserve_out, fee_bps)?,
        fee_bps,
        price_impact_bps: price_impact_bps(amount_in, reserve_in, reserve_out)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(value: u64) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_output_calculation() {
        // 100 in, 1000:2000 reserves, 0.3% fee: 99.7 * 2000 / 1099.7 = 181.32
        let out = estimate_output(units(100), units(1000), units(2000), 30).unwrap();
        assert_eq!(out, units(181));

        let scaled =
            estimate_output(units(100_000), units(1_000_000), units(2_000_000), 30).unwrap();
        assert_eq!(scaled, units(181_322));
    }

    #[test]
    fn test_output_rejects_bad_inputs() {
        assert_eq!(
            estimate_output(U256::zero(), units(1), units(1), 30),
            Err(AmmError::ZeroInput)
        );
        assert_eq!(
            estimate_output(units(1), U256::zero(), units(1), 30),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(
            estimate_output(units(1), units(1), units(1), 10_000),
            Err(AmmError::InvalidFee { fee_bps: 10_000 })
        );
    }

    #[test]
    fn test_output_never_drains_pool() {
        let out = estimate_output(U256::MAX / 2, units(1000), units(2000), 0).unwrap();
        assert!(out < units(2000));
    }

    #[test]
    fn test_price_impact() {
        // 10% of reserves moves the price by about 17%
        let impact = price_impact_bps(units(100_000), units(1_000_000), units(2_000_000)).unwrap();
        assert!(impact > 0);
        assert!(impact < 2000);

        let tiny = price_impact_bps(units(1), units(1_000_000_000), units(2_000_000_000)).unwrap();
        assert_eq!(tiny, 0);
    }

    #[test]
    fn test_preview_direction() {
        let reserves = ReservePair::new(units(1_000_000), units(2_000_000));
        let a_to_b = preview_swap(&reserves, units(100_000), SwapDirection::AToB, 30).unwrap();
        let b_to_a = preview_swap(&reserves, units(100_000), SwapDirection::BToA, 30).unwrap();
        assert_eq!(a_to_b.amount_out, units(181_322));
        assert!(b_to_a.amount_out < units(50_000));
        assert_eq!(a_to_b.fee_bps, 30);
    }
}
