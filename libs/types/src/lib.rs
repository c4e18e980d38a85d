//! # Swap Client Types Library
//!
//! Shared value types for the swap client: fixed-point token amounts, reserve
//! pairs, deposit proposals and token identifiers.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: token amounts are `U256` integers in the token's
//!   smallest unit, exactly as the contracts store them
//! - **Explicit Conversions**: decimal strings enter and leave the system only
//!   through [`parse_units`] and [`format_units`]
//! - **Typed Errors**: every rejected input maps to a distinct error variant
//!
//! ## Quick Start
//!
//! ```rust
//! use swap_types::{format_units, parse_units, DepositProposal, ReservePair, U256};
//!
//! let amount = parse_units("1.5", 18).unwrap();
//! assert_eq!(format_units(amount, 18), "1.5");
//!
//! let reserves = ReservePair::new(U256::from(1000u64), U256::from(2000u64));
//! assert!(!reserves.is_empty());
//!
//! let proposal = DepositProposal::parse("50", "100", 0, 0).unwrap();
//! assert_eq!(proposal.amount_b, U256::from(100u64));
//! ```

pub mod common;
pub mod reserves;
pub mod token;
pub mod units;

pub use common::errors::{UnitsError, ValidationError};
pub use reserves::{DepositProposal, ReservePair};
pub use token::{format_address, is_valid_address, parse_address, TokenInfo, TokenPair};
pub use units::{format_units, parse_units, pow10, DEFAULT_DECIMALS, MAX_DECIMALS};

pub use ethereum_types::{Address, H256, U256, U512};
