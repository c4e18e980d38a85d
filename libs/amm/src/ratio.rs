//! Ratio tolerance validation for proportional deposits
//!
//! A deposit `(amount_a, amount_b)` into a pool holding `(reserve_a, reserve_b)`
//! keeps the price when `amount_a / amount_b == reserve_a / reserve_b`. The
//! check accepts a relative deviation of up to `1 / divisor` (0.1% by default)
//! measured against the larger of the two compared quantities.
//!
//! An empty pool has no price yet; its first deposit must seed it 1:1, so the
//! amounts have to be exactly equal.

use crate::errors::AmmError;
use crate::math::{basis_points, mul_div};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swap_types::{DepositProposal, ReservePair, U256, U512};
use tracing::debug;

/// Default tolerance: deviations up to 1/1000 (0.1%) are accepted
pub const DEFAULT_TOLERANCE_DIVISOR: u64 = 1_000;

/// Fixed-point multiplier used by the normalized policy
pub const NORMALIZATION_SCALE: u64 = 1_000_000;

/// How the two sides of a deposit are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// `amount_a * reserve_b` against `amount_b * reserve_a`
    #[default]
    CrossProduct,
    /// `amount_a * 10^6 / reserve_a` against `amount_b * 10^6 / reserve_b`,
    /// each side truncated before comparison
    Normalized,
}

impl fmt::Display for RatioPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioPolicy::CrossProduct => write!(f, "cross_product"),
            RatioPolicy::Normalized => write!(f, "normalized"),
        }
    }
}

impl FromStr for RatioPolicy {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cross_product" => Ok(RatioPolicy::CrossProduct),
            "normalized" => Ok(RatioPolicy::Normalized),
            other => Err(AmmError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Relative tolerance expressed as `1 / divisor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioTolerance {
    divisor: u64,
}

impl RatioTolerance {
    pub const DEFAULT: Self = Self {
        divisor: DEFAULT_TOLERANCE_DIVISOR,
    };

    pub fn new(divisor: u64) -> Result<Self, AmmError> {
        if divisor == 0 {
            return Err(AmmError::InvalidTolerance);
        }
        Ok(Self { divisor })
    }

    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    /// Tolerance band as a percentage, e.g. `0.1` for the default
    pub fn as_percent(&self) -> Decimal {
        Decimal::ONE_HUNDRED / Decimal::from(self.divisor)
    }

    /// Largest accepted difference for a given larger operand (truncating)
    fn band(&self, larger: U512) -> U512 {
        larger / U512::from(self.divisor)
    }
}

impl Default for RatioTolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Full outcome of a ratio comparison, for display and logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatioCheck {
    pub policy: RatioPolicy,
    /// Pool was empty and the equal-amounts rule applied
    pub seeding: bool,
    pub left: U512,
    pub right: U512,
    pub difference: U512,
    pub tolerance: U512,
    pub within: bool,
    /// `difference / max(left, right)` in basis points
    pub deviation_bps: u64,
    /// `amount_b` that would match `amount_a` exactly, when `reserve_a > 0`
    pub expected_amount_b: Option<U256>,
}

impl RatioCheck {
    /// Deviation as a percentage with two decimals, e.g. `10.00`
    pub fn deviation_percent(&self) -> Decimal {
        Decimal::new(self.deviation_bps as i64, 2)
    }
}

/// Ratio validator configured with a policy and tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatioValidator {
    policy: RatioPolicy,
    tolerance: RatioTolerance,
}

impl RatioValidator {
    pub fn new(policy: RatioPolicy, tolerance: RatioTolerance) -> Self {
        Self { policy, tolerance }
    }

    pub fn policy(&self) -> RatioPolicy {
        self.policy
    }

    pub fn tolerance(&self) -> RatioTolerance {
        self.tolerance
    }

    /// Compare a deposit with the pool ratio
    ///
    /// Only the normalized policy can fail, with [`AmmError::ZeroReserve`],
    /// when exactly one reserve is zero.
    pub fn check(
        &self,
        reserves: &ReservePair,
        proposal: &DepositProposal,
    ) -> Result<RatioCheck, AmmError> {
        let (seeding, left, right, tolerance) = if reserves.is_empty() {
            let left = U512::from(proposal.amount_a);
            let right = U512::from(proposal.amount_b);
            (true, left, right, U512::zero())
        } else {
            let (left, right) = match self.policy {
                RatioPolicy::CrossProduct => (
                    proposal.amount_a.full_mul(reserves.reserve_b),
                    proposal.amount_b.full_mul(reserves.reserve_a),
                ),
                RatioPolicy::Normalized => {
                    if !reserves.is_funded() {
                        return Err(AmmError::ZeroReserve);
                    }
                    let scale = U256::from(NORMALIZATION_SCALE);
                    (
                        proposal.amount_a.full_mul(scale) / U512::from(reserves.reserve_a),
                        proposal.amount_b.full_mul(scale) / U512::from(reserves.reserve_b),
                    )
                }
            };
            let larger = left.max(right);
            (false, left, right, self.tolerance.band(larger))
        };

        let larger = left.max(right);
        let difference = larger - left.min(right);
        let within = difference <= tolerance;

        let expected_amount_b = if reserves.reserve_a.is_zero() {
            None
        } else {
            mul_div(
                proposal.amount_a,
                reserves.reserve_b,
                reserves.reserve_a,
                "expected amount",
            )
            .ok()
        };

        let check = RatioCheck {
            policy: self.policy,
            seeding,
            left,
            right,
            difference,
            tolerance,
            within,
            deviation_bps: basis_points(difference, larger),
            expected_amount_b,
        };

        debug!(
            policy = %check.policy,
            seeding = check.seeding,
            left = %check.left,
            right = %check.right,
            difference = %check.difference,
            tolerance = %check.tolerance,
            within = check.within,
            deviation_pct = %check.deviation_percent(),
            "Ratio check"
        );

        Ok(check)
    }
}

/// Cross-product check with the given tolerance
///
/// `(0, 0)` reserves require `amount_a == amount_b`; otherwise the deposit is
/// accepted when `|a*rb - b*ra| <= max(a*rb, b*ra) / divisor`.
pub fn is_within_ratio_tolerance(
    reserves: &ReservePair,
    proposal: &DepositProposal,
    tolerance: RatioTolerance,
) -> bool {
    if reserves.is_empty() {
        return proposal.amount_a == proposal.amount_b;
    }

    let left = proposal.amount_a.full_mul(reserves.reserve_b);
    let right = proposal.amount_b.full_mul(reserves.reserve_a);
    let larger = left.max(right);
    let smaller = left.min(right);
    larger - smaller <= tolerance.band(larger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pair(a: u64, b: u64) -> ReservePair {
        ReservePair::new(U256::from(a), U256::from(b))
    }

    fn deposit(a: u64, b: u64) -> DepositProposal {
        DepositProposal::new(U256::from(a), U256::from(b))
    }

    #[test]
    fn test_empty_pool_requires_equal_amounts() {
        let empty = ReservePair::default();
        assert!(is_within_ratio_tolerance(&empty, &deposit(5, 5), RatioTolerance::DEFAULT));
        assert!(!is_within_ratio_tolerance(&empty, &deposit(5, 6), RatioTolerance::DEFAULT));
        // No tolerance when seeding, even one unit apart
        assert!(!is_within_ratio_tolerance(
            &empty,
            &deposit(1_000_000, 1_000_001),
            RatioTolerance::DEFAULT
        ));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let reserves = pair(1000, 2000);
        assert!(is_within_ratio_tolerance(&reserves, &deposit(50, 100), RatioTolerance::DEFAULT));
        assert!(!is_within_ratio_tolerance(&reserves, &deposit(50, 90), RatioTolerance::DEFAULT));
    }

    #[test]
    fn test_tolerance_boundary() {
        // left = 1_000_000 * 1, tolerance = 1000
        let reserves = pair(1, 1);
        assert!(is_within_ratio_tolerance(
            &reserves,
            &deposit(1_000_000, 999_000),
            RatioTolerance::DEFAULT
        ));
        assert!(!is_within_ratio_tolerance(
            &reserves,
            &deposit(1_000_000, 998_999),
            RatioTolerance::DEFAULT
        ));
        // Larger side is b here: tolerance = 1_001_000 / 1000 = 1001
        assert!(is_within_ratio_tolerance(
            &reserves,
            &deposit(1_000_000, 1_001_000),
            RatioTolerance::DEFAULT
        ));
        assert!(!is_within_ratio_tolerance(
            &reserves,
            &deposit(1_000_000, 1_001_002),
            RatioTolerance::DEFAULT
        ));
    }

    #[test]
    fn test_tolerance_truncates() {
        // larger = 1999, tolerance = 1 (not 1.999)
        let reserves = pair(1, 1);
        let tolerance = RatioTolerance::DEFAULT;
        assert!(is_within_ratio_tolerance(&reserves, &deposit(1999, 1998), tolerance));
        assert!(!is_within_ratio_tolerance(&reserves, &deposit(1999, 1997), tolerance));
    }

    #[test]
    fn test_custom_tolerance() {
        let one_percent = RatioTolerance::new(100).unwrap();
        assert_eq!(one_percent.as_percent(), dec!(1));
        assert!(is_within_ratio_tolerance(&pair(1, 1), &deposit(100, 99), one_percent));
        assert!(!is_within_ratio_tolerance(&pair(1, 1), &deposit(100, 98), one_percent));
        assert_eq!(RatioTolerance::new(0), Err(AmmError::InvalidTolerance));
        assert_eq!(RatioTolerance::DEFAULT.as_percent(), dec!(0.1));
    }

    #[test]
    fn test_check_reports_diagnostics() {
        let validator = RatioValidator::default();
        let check = validator.check(&pair(1000, 2000), &deposit(50, 90)).unwrap();
        assert!(!check.within);
        assert!(!check.seeding);
        assert_eq!(check.left, U512::from(100_000u64));
        assert_eq!(check.right, U512::from(90_000u64));
        assert_eq!(check.difference, U512::from(10_000u64));
        assert_eq!(check.tolerance, U512::from(100u64));
        assert_eq!(check.deviation_bps, 1000);
        assert_eq!(check.deviation_percent(), dec!(10.00));
        assert_eq!(check.expected_amount_b, Some(U256::from(100u64)));
    }

    #[test]
    fn test_check_seeding_reports_no_expected_amount() {
        let check = RatioValidator::default()
            .check(&ReservePair::default(), &deposit(3, 3))
            .unwrap();
        assert!(check.seeding);
        assert!(check.within);
        assert_eq!(check.expected_amount_b, None);
    }

    #[test]
    fn test_normalized_policy() {
        let validator = RatioValidator::new(RatioPolicy::Normalized, RatioTolerance::DEFAULT);
        let reserves = pair(1000, 2000);
        assert!(validator.check(&reserves, &deposit(50, 100)).unwrap().within);
        assert!(!validator.check(&reserves, &deposit(50, 90)).unwrap().within);

        let one_sided = pair(1000, 0);
        assert_eq!(
            validator.check(&one_sided, &deposit(50, 100)),
            Err(AmmError::ZeroReserve)
        );
    }

    #[test]
    fn test_cross_product_with_one_sided_reserves_is_defined() {
        let validator = RatioValidator::default();
        let check = validator.check(&pair(0, 2000), &deposit(50, 100)).unwrap();
        // left = 50 * 2000, right = 100 * 0
        assert!(!check.within);
        assert_eq!(check.expected_amount_b, None);
    }

    #[test]
    fn test_policies_disagree_only_by_truncation() {
        // Tiny reserves make the normalized form lose precision per side
        let reserves = pair(3, 7);
        let proposal = deposit(1, 2);
        let cross = RatioValidator::default().check(&reserves, &proposal).unwrap();
        let normalized = RatioValidator::new(RatioPolicy::Normalized, RatioTolerance::DEFAULT)
            .check(&reserves, &proposal)
            .unwrap();
        assert!(!cross.within);
        assert!(!normalized.within);
        assert_eq!(normalized.left, U512::from(333_333u64));
        assert_eq!(normalized.right, U512::from(285_714u64));
    }

    #[test]
    fn test_no_overflow_at_u256_max() {
        let reserves = ReservePair::new(U256::MAX, U256::MAX);
        let proposal = DepositProposal::new(U256::MAX, U256::MAX);
        assert!(is_within_ratio_tolerance(&reserves, &proposal, RatioTolerance::DEFAULT));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("cross-product".parse::<RatioPolicy>().unwrap(), RatioPolicy::CrossProduct);
        assert_eq!("Normalized".parse::<RatioPolicy>().unwrap(), RatioPolicy::Normalized);
        assert!("median".parse::<RatioPolicy>().is_err());
        assert_eq!(RatioPolicy::Normalized.to_string(), "normalized");
    }
}
