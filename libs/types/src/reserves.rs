//! Pool reserves and proposed deposits
//!
//! Both are pairs of smallest-unit integers. `(0, 0)` reserves mark a pool
//! that has never been seeded.

use crate::common::errors::UnitsError;
use crate::units::parse_units;
use ethereum_types::U256;

/// Current on-chain balances of a pool, token A first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReservePair {
    pub reserve_a: U256,
    pub reserve_b: U256,
}

impl ReservePair {
    pub fn new(reserve_a: U256, reserve_b: U256) -> Self {
        Self {
            reserve_a,
            reserve_b,
        }
    }

    /// Uninitialized pool: nothing deposited on either side
    pub fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }

    /// Both sides hold a balance, so a price exists
    pub fn is_funded(&self) -> bool {
        !self.reserve_a.is_zero() && !self.reserve_b.is_zero()
    }
}

/// Amounts a user proposes to add, token A first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepositProposal {
    pub amount_a: U256,
    pub amount_b: U256,
}

impl DepositProposal {
    pub fn new(amount_a: U256, amount_b: U256) -> Self {
        Self { amount_a, amount_b }
    }

    /// Parse both form inputs, each at its own token's scale
    pub fn parse(
        amount_a: &str,
        amount_b: &str,
        decimals_a: u8,
        decimals_b: u8,
    ) -> Result<Self, UnitsError> {
        Ok(Self {
            amount_a: parse_units(amount_a, decimals_a)?,
            amount_b: parse_units(amount_b, decimals_b)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_states() {
        assert!(ReservePair::default().is_empty());
        assert!(!ReservePair::default().is_funded());

        let one_sided = ReservePair::new(U256::from(5u64), U256::zero());
        assert!(!one_sided.is_empty());
        assert!(!one_sided.is_funded());

        let funded = ReservePair::new(U256::from(5u64), U256::from(7u64));
        assert!(funded.is_funded());
    }

    #[test]
    fn test_parse_proposal_uses_each_scale() {
        let proposal = DepositProposal::parse("1", "1", 18, 6).unwrap();
        assert_eq!(proposal.amount_a, U256::exp10(18));
        assert_eq!(proposal.amount_b, U256::exp10(6));

        assert!(DepositProposal::parse("1", "", 18, 18).is_err());
    }
}
