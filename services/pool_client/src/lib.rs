//! Swap Client
//!
//! Chain-facing side of the swap client. All contract access goes through
//! the [`PoolChain`] trait, which callers construct once and pass in as
//! `Arc<dyn PoolChain>`; nothing in this crate holds a global client.
//!
//! Features:
//! - Token and pool discovery through the pool manager
//! - Reserve tracking with last-write-wins snapshots
//! - Add-liquidity form with ratio gating and quote fallback
//! - Withdrawal of LP positions, pool creation and token launches

pub mod abi;
pub mod chain;
pub mod errors;
pub mod launcher;
pub mod liquidity;
pub mod pools;
pub mod reserves;
pub mod rpc_client;
pub mod withdraw;

pub use chain::{
    resolve_account, wait_for_receipt, ContractCall, EventLog, PoolChain, ReceiptWait, TxHash,
    TxReceipt,
};
pub use errors::{ClientError, Result};
pub use launcher::{decode_token_launched, LaunchedToken, TokenLauncher};
pub use liquidity::{AddLiquidity, LiquidityMode, Quote, QuoteSource};
pub use pools::{CreatedPool, PoolDirectory, PoolHandle, PoolOverview};
pub use reserves::{ReserveSnapshot, ReserveTracker};
pub use rpc_client::RpcPoolChain;
pub use withdraw::{RemoveLiquidity, Withdrawal};
