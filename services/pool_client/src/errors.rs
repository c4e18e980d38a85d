//! Error types for chain access and liquidity workflows

use swap_amm::{AmmError, Decimal};
use swap_types::{Address, UnitsError, ValidationError, H256};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No account available to send transactions")]
    NoAccount,

    #[error("Both token amounts are required")]
    MissingAmount,

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Deposit deviates {deviation}% from the pool ratio, tolerance is {tolerance}%")]
    RatioOutOfTolerance { deviation: Decimal, tolerance: Decimal },

    #[error("No LP tokens to withdraw")]
    NoLiquidity,

    #[error("Token {0:?} has no name or symbol")]
    MissingMetadata(Address),

    #[error("Token launcher address is not configured")]
    LauncherNotConfigured,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Transaction {0:?} reverted")]
    Reverted(H256),

    #[error("Timed out waiting for receipt of {hash:?} after {waited_ms} ms")]
    ReceiptTimeout { hash: H256, waited_ms: u128 },

    #[error(transparent)]
    Units(#[from] UnitsError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Amm(#[from] AmmError),

    /// Transport, ABI and contract call failures
    #[error(transparent)]
    Rpc(#[from] anyhow::Error),
}
