//! Pool directory and pool creation
//!
//! Lists the tokens known to the pool manager, resolves the pool for a pair,
//! and creates new pools from two token addresses.

use std::sync::Arc;
use swap_amm::math::basis_points;
use swap_amm::Decimal;
use swap_types::{
    format_units, parse_address, Address, ReservePair, TokenInfo, TokenPair, ValidationError,
    U256, U512,
};
use tracing::{debug, info, warn};

use crate::chain::{wait_for_receipt, ContractCall, PoolChain, ReceiptWait, TxReceipt};
use crate::errors::{ClientError, Result};

/// A resolved pool together with both tokens' metadata and decimals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolHandle {
    pub pool: Address,
    pub token_a: TokenInfo,
    pub token_b: TokenInfo,
    pub decimals_a: u8,
    pub decimals_b: u8,
}

/// Reserves and LP position of one pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOverview {
    pub handle: PoolHandle,
    pub reserves: ReservePair,
    pub lp_token: Address,
    pub lp_decimals: u8,
    pub lp_total_supply: U256,
    /// LP balance of the queried account, when one was given
    pub lp_balance: Option<U256>,
}

impl PoolOverview {
    /// Reserves rendered at each token's own scale
    pub fn formatted_reserves(&self) -> (String, String) {
        (
            format_units(self.reserves.reserve_a, self.handle.decimals_a),
            format_units(self.reserves.reserve_b, self.handle.decimals_b),
        )
    }

    pub fn formatted_lp_balance(&self) -> Option<String> {
        self.lp_balance
            .map(|balance| format_units(balance, self.lp_decimals))
    }

    /// Account's share of LP supply, two decimals
    pub fn pool_share_percent(&self) -> Option<Decimal> {
        let balance = self.lp_balance?;
        let bps = basis_points(U512::from(balance), U512::from(self.lp_total_supply));
        Some(Decimal::new(bps as i64, 2))
    }
}

/// Result of a create-pool transaction
#[derive(Debug, Clone)]
pub struct CreatedPool {
    pub pair: TokenPair,
    /// Resolved after mining; `None` if the manager does not report it yet
    pub pool: Option<Address>,
    pub receipt: TxReceipt,
}

pub struct PoolDirectory {
    chain: Arc<dyn PoolChain>,
}

impl PoolDirectory {
    pub fn new(chain: Arc<dyn PoolChain>) -> Self {
        Self { chain }
    }

    pub async fn all_tokens(&self) -> Result<Vec<TokenInfo>> {
        self.chain.all_tokens().await
    }

    /// Tokens that can be paired with `token`
    pub async fn paired_tokens(&self, token: Address) -> Result<Vec<TokenInfo>> {
        self.chain.paired_tokens(token).await
    }

    pub async fn find_pool(&self, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        if token_a == token_b {
            return Ok(None);
        }
        self.chain.pool_address(token_a, token_b).await
    }

    /// Resolve the pool for a pair and load both tokens' metadata
    pub async fn open_pool(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<Option<PoolHandle>> {
        let Some(pool) = self.find_pool(token_a, token_b).await? else {
            debug!("No pool for {:?}/{:?}", token_a, token_b);
            return Ok(None);
        };

        let handle = PoolHandle {
            pool,
            token_a: self.chain.token_metadata(token_a).await?,
            token_b: self.chain.token_metadata(token_b).await?,
            decimals_a: self.chain.token_decimals(token_a).await?,
            decimals_b: self.chain.token_decimals(token_b).await?,
        };
        Ok(Some(handle))
    }

    pub async fn overview(
        &self,
        handle: &PoolHandle,
        account: Option<Address>,
    ) -> Result<PoolOverview> {
        let reserves = self.chain.pool_reserves(handle.pool).await?;
        let lp_token = self.chain.lp_token(handle.pool).await?;
        let lp_decimals = self.chain.token_decimals(lp_token).await?;
        let lp_total_supply = self.chain.total_supply(lp_token).await?;

        let lp_balance = match account {
            Some(account) => Some(self.chain.lp_share(handle.pool, account).await?),
            None => None,
        };

        Ok(PoolOverview {
            handle: handle.clone(),
            reserves,
            lp_token,
            lp_decimals,
            lp_total_supply,
            lp_balance,
        })
    }

    /// Create a pool for two token addresses typed by the user
    ///
    /// Both tokens must expose a name and symbol. The pool address is looked
    /// up again once the transaction is mined.
    pub async fn create_pool(
        &self,
        from: Address,
        token_a: &str,
        token_b: &str,
        wait: ReceiptWait,
    ) -> Result<CreatedPool> {
        let address_a = parse_address(token_a)?;
        let address_b = parse_address(token_b)?;
        if address_a == address_b {
            return Err(ValidationError::IdenticalTokens.into());
        }

        let info_a = self.chain.token_metadata(address_a).await?;
        let info_b = self.chain.token_metadata(address_b).await?;
        for info in [&info_a, &info_b] {
            if !info.has_metadata() {
                return Err(ClientError::MissingMetadata(info.address));
            }
        }
        let pair = TokenPair::new(info_a, info_b)?;

        let hash = self
            .chain
            .send(
                from,
                ContractCall::CreatePool {
                    token_a: pair.token_a.clone(),
                    token_b: pair.token_b.clone(),
                },
            )
            .await?;
        let receipt = wait_for_receipt(self.chain.as_ref(), hash, wait).await?;

        let pool = match self.chain.pool_address(address_a, address_b).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Pool created but its address could not be resolved: {}", e);
                None
            }
        };
        info!(
            "Created pool {}/{} at {:?}",
            pair.token_a.symbol, pair.token_b.symbol, pool
        );

        Ok(CreatedPool {
            pair,
            pool,
            receipt,
        })
    }
}
