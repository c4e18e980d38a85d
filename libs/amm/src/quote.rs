//! Client-side liquidity quotes
//!
//! Mirrors the pool's own `liquidityQuote`; used when that call fails and for
//! the "1 A = x B" price line.

use crate::errors::AmmError;
use crate::math::mul_div;
use swap_types::{pow10, ReservePair, U256};

/// Amount of token B matching `amount_a` at the current ratio
///
/// `floor(amount_a * reserve_b / reserve_a)`. A zero `reserve_a` is
/// [`AmmError::CannotQuote`], never a silent zero.
pub fn quote_matching_amount(reserves: &ReservePair, amount_a: U256) -> Result<U256, AmmError> {
    if reserves.reserve_a.is_zero() {
        return Err(AmmError::CannotQuote);
    }
    mul_div(
        amount_a,
        reserves.reserve_b,
        reserves.reserve_a,
        "matching amount",
    )
}

/// Price of one whole token A, in token B's smallest unit
///
/// Requires both reserves to be non-zero; format the result with token B's
/// decimals for display.
pub fn spot_price(reserves: &ReservePair, decimals_a: u8) -> Result<U256, AmmError> {
    if !reserves.is_funded() {
        return Err(AmmError::CannotQuote);
    }
    quote_matching_amount(reserves, pow10(decimals_a)?)
}
