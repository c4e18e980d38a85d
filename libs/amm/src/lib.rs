//! # Swap AMM Library - Proportional Liquidity Mathematics
//!
//! ## Purpose
//!
//! Client-side arithmetic in front of a constant-ratio pool: decides whether a
//! proposed deposit keeps the pool's current price ratio within tolerance,
//! quotes the second-side amount that matches a first-side amount exactly, and
//! previews swap outputs. The pool contracts remain authoritative; everything
//! here is a pure function over the latest reserve snapshot.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve snapshots read from the pool contract, amounts
//!   parsed from form input by `swap_types::parse_units`
//! - **Output Destinations**: the add-liquidity workflow (submit gating, quote
//!   fallback), the CLI
//! - **Precision**: `U256` amounts, every product widened to `U512`, so no
//!   intermediate can overflow
//!
//! ## Truncation Policy
//!
//! The default [`RatioPolicy::CrossProduct`] truncates once, when the tolerance
//! is taken from the larger cross-product. [`RatioPolicy::Normalized`]
//! truncates each side's normalized ratio before comparing, so the two are
//! close but not bit-exact.

pub mod deposit;
pub mod errors;
pub mod math;
pub mod quote;
pub mod ratio;
pub mod swap;

pub use deposit::{DepositCheck, DepositVerdict, SkipReason};
pub use errors::AmmError;
pub use quote::{quote_matching_amount, spot_price};
pub use ratio::{
    is_within_ratio_tolerance, RatioCheck, RatioPolicy, RatioTolerance, RatioValidator,
    DEFAULT_TOLERANCE_DIVISOR, NORMALIZATION_SCALE,
};
pub use swap::{estimate_output, price_impact_bps, preview_swap, SwapDirection, SwapPreview};

/// Display type for percentages
pub use rust_decimal::Decimal;
