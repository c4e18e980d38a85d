//! Remove-liquidity workflow: return the account's whole LP position

use std::sync::Arc;
use swap_types::{format_units, Address, U256};
use tracing::{info, warn};

use crate::chain::{wait_for_receipt, ContractCall, PoolChain, ReceiptWait, TxReceipt};
use crate::errors::{ClientError, Result};
use crate::reserves::ReserveTracker;

#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub lp_token: Address,
    pub lp_amount: U256,
    pub lp_decimals: u8,
    pub receipt: TxReceipt,
}

impl Withdrawal {
    pub fn formatted_amount(&self) -> String {
        format_units(self.lp_amount, self.lp_decimals)
    }
}

pub struct RemoveLiquidity {
    chain: Arc<dyn PoolChain>,
    wait: ReceiptWait,
}

impl RemoveLiquidity {
    pub fn new(chain: Arc<dyn PoolChain>, wait: ReceiptWait) -> Self {
        Self { chain, wait }
    }

    /// Approve the pool for the LP balance and pull all liquidity
    ///
    /// Reserves are refreshed through `tracker` when one is given.
    pub async fn remove_all(
        &self,
        pool: Address,
        from: Address,
        tracker: Option<&ReserveTracker>,
    ) -> Result<Withdrawal> {
        let lp_token = self.chain.lp_token(pool).await?;
        let lp_decimals = self.chain.token_decimals(lp_token).await?;
        let lp_amount = self.chain.lp_share(pool, from).await?;
        if lp_amount.is_zero() {
            return Err(ClientError::NoLiquidity);
        }

        self.chain
            .send(
                from,
                ContractCall::Approve {
                    token: lp_token,
                    spender: pool,
                    amount: lp_amount,
                },
            )
            .await?;
        let hash = self
            .chain
            .send(from, ContractCall::PullLiquidity { pool })
            .await?;
        let receipt = wait_for_receipt(self.chain.as_ref(), hash, self.wait).await?;

        info!(
            "Removed {} LP tokens from {:?}",
            format_units(lp_amount, lp_decimals),
            pool
        );

        if let Some(tracker) = tracker {
            if let Err(e) = tracker.refresh_pool(pool).await {
                warn!("Reserve refresh after withdrawal failed: {}", e);
            }
        }

        Ok(Withdrawal {
            lp_token,
            lp_amount,
            lp_decimals,
            receipt,
        })
    }
}
