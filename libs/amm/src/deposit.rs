//! Deposit precheck: decide whether the ratio check can run at all
//!
//! Form input arrives before reserves are loaded and while the user is still
//! typing. Those states are reported as [`DepositVerdict::Unchecked`] and do
//! not block submission; the arithmetic in [`crate::ratio`] only runs once
//! every input is present and well-formed.

use crate::ratio::{RatioCheck, RatioValidator};
use swap_types::{DepositProposal, ReservePair, UnitsError};
use tracing::debug;

/// Why a deposit could not be checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No reserve snapshot has been fetched yet
    ReservesUnavailable,
    /// One or both amount fields are blank
    MissingAmount,
    /// An amount field does not parse at the token's scale
    UnparsableAmount(UnitsError),
    /// Exactly one reserve is zero; no ratio exists to preserve
    OneSidedReserves,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositVerdict {
    Unchecked(SkipReason),
    Within(RatioCheck),
    OutOfTolerance(RatioCheck),
}

impl DepositVerdict {
    /// Unchecked deposits pass; only a failed comparison blocks
    pub fn allows_submit(&self) -> bool {
        !matches!(self, DepositVerdict::OutOfTolerance(_))
    }

    pub fn ratio_check(&self) -> Option<&RatioCheck> {
        match self {
            DepositVerdict::Within(check) | DepositVerdict::OutOfTolerance(check) => Some(check),
            DepositVerdict::Unchecked(_) => None,
        }
    }
}

/// Ratio validator bound to the decimal scales of a token pair
#[derive(Debug, Clone, Copy)]
pub struct DepositCheck {
    validator: RatioValidator,
    decimals_a: u8,
    decimals_b: u8,
}

impl DepositCheck {
    pub fn new(validator: RatioValidator, decimals_a: u8, decimals_b: u8) -> Self {
        Self {
            validator,
            decimals_a,
            decimals_b,
        }
    }

    pub fn validator(&self) -> &RatioValidator {
        &self.validator
    }

    pub fn evaluate(
        &self,
        reserves: Option<&ReservePair>,
        amount_a: &str,
        amount_b: &str,
    ) -> DepositVerdict {
        let Some(reserves) = reserves else {
            return DepositVerdict::Unchecked(SkipReason::ReservesUnavailable);
        };
        if amount_a.trim().is_empty() || amount_b.trim().is_empty() {
            return DepositVerdict::Unchecked(SkipReason::MissingAmount);
        }
        if !reserves.is_empty() && !reserves.is_funded() {
            return DepositVerdict::Unchecked(SkipReason::OneSidedReserves);
        }

        let parsed = DepositProposal::parse(amount_a, amount_b, self.decimals_a, self.decimals_b);
        let proposal = match parsed {
            Ok(proposal) => proposal,
            Err(e) => {
                debug!("Skipping ratio check, amount does not parse: {}", e);
                return DepositVerdict::Unchecked(SkipReason::UnparsableAmount(e));
            }
        };

        match self.validator.check(reserves, &proposal) {
            Ok(check) if check.within => DepositVerdict::Within(check),
            Ok(check) => DepositVerdict::OutOfTolerance(check),
            // Only reachable with one-sided reserves, which were filtered above
            Err(_) => DepositVerdict::Unchecked(SkipReason::OneSidedReserves),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::{RatioPolicy, RatioTolerance};
    use swap_types::U256;

    fn check() -> DepositCheck {
        DepositCheck::new(RatioValidator::default(), 18, 18)
    }

    fn whole(amount: u64) -> U256 {
        U256::from(amount) * U256::exp10(18)
    }

    #[test]
    fn test_fails_open_without_reserves() {
        let verdict = check().evaluate(None, "1", "2");
        assert_eq!(verdict, DepositVerdict::Unchecked(SkipReason::ReservesUnavailable));
        assert!(verdict.allows_submit());
    }

    #[test]
    fn test_fails_open_on_blank_or_bad_input() {
        let reserves = ReservePair::new(whole(1000), whole(2000));
        assert_eq!(
            check().evaluate(Some(&reserves), "", "2"),
            DepositVerdict::Unchecked(SkipReason::MissingAmount)
        );
        let verdict = check().evaluate(Some(&reserves), "abc", "2");
        assert!(matches!(
            verdict,
            DepositVerdict::Unchecked(SkipReason::UnparsableAmount(UnitsError::Invalid { .. }))
        ));
        assert!(verdict.allows_submit());
        assert!(verdict.ratio_check().is_none());
    }

    #[test]
    fn test_one_sided_reserves_are_not_checked() {
        let reserves = ReservePair::new(whole(1000), U256::zero());
        let strict = DepositCheck::new(
            RatioValidator::new(RatioPolicy::Normalized, RatioTolerance::DEFAULT),
            18,
            18,
        );
        assert_eq!(
            strict.evaluate(Some(&reserves), "1", "1"),
            DepositVerdict::Unchecked(SkipReason::OneSidedReserves)
        );
    }

    #[test]
    fn test_human_amounts_at_token_scale() {
        let reserves = ReservePair::new(whole(1000), whole(2000));
        let within = check().evaluate(Some(&reserves), "0.5", "1");
        assert!(matches!(within, DepositVerdict::Within(_)));
        assert!(within.allows_submit());

        let outside = check().evaluate(Some(&reserves), "50", "90");
        assert!(!outside.allows_submit());
        assert_eq!(outside.ratio_check().unwrap().deviation_bps, 1000);
    }

    #[test]
    fn test_empty_pool_seeding_compares_scaled_amounts() {
        let empty = ReservePair::default();
        assert!(matches!(
            check().evaluate(Some(&empty), "1.0", "1"),
            DepositVerdict::Within(_)
        ));
        assert!(matches!(
            check().evaluate(Some(&empty), "1", "1.000001"),
            DepositVerdict::OutOfTolerance(_)
        ));

        // Different decimals: 1 unit of each is a different raw amount
        let mixed = DepositCheck::new(RatioValidator::default(), 18, 6);
        assert!(matches!(
            mixed.evaluate(Some(&empty), "1", "1"),
            DepositVerdict::OutOfTolerance(_)
        ));
    }
}
