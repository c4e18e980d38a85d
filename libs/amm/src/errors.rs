//! Error types for pool arithmetic

use swap_types::UnitsError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Quoting divides by the input-side reserve
    #[error("Cannot quote: reserve of the input token is zero")]
    CannotQuote,

    /// Normalized ratios divide by each reserve
    #[error("Reserve is zero on one side of a non-empty pool")]
    ZeroReserve,

    #[error("Arithmetic overflow computing {context}")]
    Overflow { context: &'static str },

    #[error("Division by zero computing {context}")]
    DivisionByZero { context: &'static str },

    #[error("Tolerance divisor must be positive")]
    InvalidTolerance,

    #[error("Input amount must be positive")]
    ZeroInput,

    #[error("Insufficient liquidity: reserves must be positive")]
    InsufficientLiquidity,

    #[error("Fee of {fee_bps} bps must be below 10000")]
    InvalidFee { fee_bps: u32 },

    #[error("Unknown ratio policy '{0}'")]
    UnknownPolicy(String),

    #[error(transparent)]
    Units(#[from] UnitsError),
}
