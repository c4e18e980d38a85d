//! Chain access seam
//!
//! Every workflow talks to the contracts through [`PoolChain`], handed in as
//! an `Arc<dyn PoolChain>`. Production code uses
//! [`crate::rpc_client::RpcPoolChain`]; tests substitute an in-memory chain.

use async_trait::async_trait;
use std::time::Duration;
use swap_config::PollingSettings;
use swap_types::{Address, ReservePair, TokenInfo, H256, U256};
use tokio::time::Instant;
use tracing::debug;

use crate::errors::{ClientError, Result};

pub type TxHash = H256;

/// State-changing contract calls the client can submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// ERC-20 `approve(spender, amount)` on `token`
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    AddLiquidity {
        pool: Address,
        amount_a: U256,
        amount_b: U256,
    },
    /// Withdraw the sender's whole position
    PullLiquidity { pool: Address },
    /// Sent to the pool manager
    CreatePool {
        token_a: TokenInfo,
        token_b: TokenInfo,
    },
    /// Sent to the token launcher
    LaunchToken {
        name: String,
        symbol: String,
        initial_supply: U256,
    },
    /// Sent to the token launcher
    MintExistingToken { token: Address, amount: U256 },
}

impl ContractCall {
    /// Contract function this call invokes
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::Approve { .. } => "approve",
            ContractCall::AddLiquidity { .. } => "addLiquidity",
            ContractCall::PullLiquidity { .. } => "pullLiquidityAsLp",
            ContractCall::CreatePool { .. } => "createPool",
            ContractCall::LaunchToken { .. } => "launchToken",
            ContractCall::MintExistingToken { .. } => "mintExistingToken",
        }
    }
}

/// Raw event log as found in a receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    pub address: Address,
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
}

/// Mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
    pub logs: Vec<EventLog>,
}

/// Contract reads and writes used by the client
#[async_trait]
pub trait PoolChain: Send + Sync {
    /// Accounts the node can sign for
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Every token registered with the pool manager
    async fn all_tokens(&self) -> Result<Vec<TokenInfo>>;

    /// Tokens that share a pool with `token`
    async fn paired_tokens(&self, token: Address) -> Result<Vec<TokenInfo>>;

    /// Pool for the pair, `None` when the manager returns the zero address
    async fn pool_address(&self, token_a: Address, token_b: Address) -> Result<Option<Address>>;

    async fn pool_reserves(&self, pool: Address) -> Result<ReservePair>;

    /// The pool's own matching-amount quote
    async fn liquidity_quote(&self, pool: Address, amount_a: U256) -> Result<U256>;

    /// LP tokens held by `account` in `pool`
    async fn lp_share(&self, pool: Address, account: Address) -> Result<U256>;

    async fn lp_token(&self, pool: Address) -> Result<Address>;

    /// Name and symbol read from the token contract
    async fn token_metadata(&self, token: Address) -> Result<TokenInfo>;

    async fn token_decimals(&self, token: Address) -> Result<u8>;

    async fn total_supply(&self, token: Address) -> Result<U256>;

    /// Submit a transaction signed by `from`
    async fn send(&self, from: Address, call: ContractCall) -> Result<TxHash>;

    /// Receipt of a mined transaction, `None` while pending
    async fn receipt(&self, hash: TxHash) -> Result<Option<TxReceipt>>;
}

/// How long and how often to poll for receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptWait {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ReceiptWait {
    fn default() -> Self {
        Self::from(&PollingSettings::default())
    }
}

impl From<&PollingSettings> for ReceiptWait {
    fn from(settings: &PollingSettings) -> Self {
        Self {
            poll_interval: settings.receipt_poll_interval(),
            timeout: settings.receipt_timeout(),
        }
    }
}

/// Poll until `hash` is mined; a reverted transaction is an error
pub async fn wait_for_receipt(
    chain: &dyn PoolChain,
    hash: TxHash,
    wait: ReceiptWait,
) -> Result<TxReceipt> {
    let started = Instant::now();
    loop {
        if let Some(receipt) = chain.receipt(hash).await? {
            debug!(
                "Receipt for {:?} in block {:?}, success={}",
                hash, receipt.block_number, receipt.success
            );
            if !receipt.success {
                return Err(ClientError::Reverted(hash));
            }
            return Ok(receipt);
        }

        let waited = started.elapsed();
        if waited >= wait.timeout {
            return Err(ClientError::ReceiptTimeout {
                hash,
                waited_ms: waited.as_millis(),
            });
        }
        tokio::time::sleep(wait.poll_interval).await;
    }
}

/// First account the node exposes, unless one was given explicitly
pub async fn resolve_account(chain: &dyn PoolChain, explicit: Option<Address>) -> Result<Address> {
    if let Some(account) = explicit {
        return Ok(account);
    }
    chain
        .accounts()
        .await?
        .into_iter()
        .next()
        .ok_or(ClientError::NoAccount)
}
