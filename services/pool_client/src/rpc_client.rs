//! RPC-backed chain access
//!
//! Handles all communication with the node: contract reads through
//! `eth_call`, writes through `eth_sendTransaction` from node-managed
//! accounts, and receipt lookups.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use swap_config::{ChainSettings, ContractAddresses};
use swap_types::{Address, ReservePair, TokenInfo, U256};
use tracing::{debug, info};
use web3::contract::tokens::Tokenize;
use web3::contract::{Contract, Options};
use web3::ethabi::Token;
use web3::transports::Http;
use web3::types::{TransactionReceipt, H256};
use web3::Web3;

use crate::abi::{ERC20_ABI, POOL_ABI, POOL_MANAGER_ABI, TOKEN_LAUNCHER_ABI};
use crate::chain::{ContractCall, EventLog, PoolChain, TxHash, TxReceipt};
use crate::errors::{ClientError, Result};

pub struct RpcPoolChain {
    web3: Web3<Http>,
    contracts: ContractAddresses,
}

impl RpcPoolChain {
    /// Connect to the configured RPC endpoint
    pub fn new(chain: &ChainSettings, contracts: ContractAddresses) -> anyhow::Result<Self> {
        let transport = Http::new(&chain.rpc_url)
            .with_context(|| format!("Invalid RPC endpoint '{}'", chain.rpc_url))?;
        debug!("RPC transport ready for {}", chain.rpc_url);

        Ok(Self {
            web3: Web3::new(transport),
            contracts,
        })
    }

    fn contract(&self, address: Address, abi: &str) -> anyhow::Result<Contract<Http>> {
        Contract::from_json(self.web3.eth(), address, abi.as_bytes())
            .context("Failed to load contract ABI")
    }

    fn pool_manager(&self) -> anyhow::Result<Contract<Http>> {
        self.contract(self.contracts.pool_manager, POOL_MANAGER_ABI)
    }

    fn launcher(&self) -> Result<Contract<Http>> {
        let address = self
            .contracts
            .token_launcher
            .ok_or(ClientError::LauncherNotConfigured)?;
        Ok(self.contract(address, TOKEN_LAUNCHER_ABI)?)
    }

    async fn token_list<P>(&self, func: &str, params: P) -> Result<Vec<TokenInfo>>
    where
        P: Tokenize + Send,
    {
        let tokens: Vec<Token> = self
            .pool_manager()?
            .query(func, params, None, Options::default(), None)
            .await
            .with_context(|| format!("Failed to call {}", func))?;

        let infos = tokens
            .into_iter()
            .map(token_info_from_tuple)
            .collect::<anyhow::Result<Vec<_>>>()?;
        debug!("{} returned {} tokens", func, infos.len());
        Ok(infos)
    }
}

/// Decode one `(string name, string symbol, address tokenAddress)` entry
fn token_info_from_tuple(token: Token) -> anyhow::Result<TokenInfo> {
    let Token::Tuple(fields) = token else {
        return Err(anyhow!("Expected token tuple, got {:?}", token));
    };
    match fields.as_slice() {
        [Token::String(name), Token::String(symbol), Token::Address(address)] => {
            Ok(TokenInfo::new(name.clone(), symbol.clone(), *address))
        }
        other => Err(anyhow!("Unexpected token tuple layout: {:?}", other)),
    }
}

fn receipt_from_web3(receipt: TransactionReceipt) -> TxReceipt {
    TxReceipt {
        hash: receipt.transaction_hash,
        block_number: receipt.block_number.map(|n| n.as_u64()),
        // Receipts without a status field predate EIP-658 and were not reverted
        success: receipt.status.map_or(true, |status| status.as_u64() == 1),
        logs: receipt
            .logs
            .into_iter()
            .map(|log| EventLog {
                address: log.address,
                topics: log.topics,
                data: log.data.0,
            })
            .collect(),
    }
}

#[async_trait]
impl PoolChain for RpcPoolChain {
    async fn accounts(&self) -> Result<Vec<Address>> {
        let accounts = self
            .web3
            .eth()
            .accounts()
            .await
            .context("Failed to list node accounts")?;
        Ok(accounts)
    }

    async fn all_tokens(&self) -> Result<Vec<TokenInfo>> {
        self.token_list("getAllTokens", ()).await
    }

    async fn paired_tokens(&self, token: Address) -> Result<Vec<TokenInfo>> {
        self.token_list("getPairedTokenInfobyAddress", (token,)).await
    }

    async fn pool_address(&self, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        let pool: Address = self
            .pool_manager()?
            .query(
                "getPoolAddress",
                (token_a, token_b),
                None,
                Options::default(),
                None,
            )
            .await
            .context("Failed to get pool address")?;

        Ok((!pool.is_zero()).then_some(pool))
    }

    async fn pool_reserves(&self, pool: Address) -> Result<ReservePair> {
        let (reserve_a, reserve_b): (U256, U256) = self
            .contract(pool, POOL_ABI)?
            .query("getPoolReserves", (), None, Options::default(), None)
            .await
            .context("Failed to get pool reserves")?;

        Ok(ReservePair::new(reserve_a, reserve_b))
    }

    async fn liquidity_quote(&self, pool: Address, amount_a: U256) -> Result<U256> {
        let quote: U256 = self
            .contract(pool, POOL_ABI)?
            .query("liquidityQuote", (amount_a,), None, Options::default(), None)
            .await
            .context("Failed to get liquidity quote")?;
        Ok(quote)
    }

    async fn lp_share(&self, pool: Address, account: Address) -> Result<U256> {
        let share: U256 = self
            .contract(pool, POOL_ABI)?
            .query("getPoolTokenShare", (account,), None, Options::default(), None)
            .await
            .context("Failed to get LP share")?;
        Ok(share)
    }

    async fn lp_token(&self, pool: Address) -> Result<Address> {
        let lp_token: Address = self
            .contract(pool, POOL_ABI)?
            .query("getPoolTokenAddress", (), None, Options::default(), None)
            .await
            .context("Failed to get LP token address")?;
        Ok(lp_token)
    }

    async fn token_metadata(&self, token: Address) -> Result<TokenInfo> {
        let contract = self.contract(token, ERC20_ABI)?;

        let name: String = contract
            .query("name", (), None, Options::default(), None)
            .await
            .context("Failed to get token name")?;

        let symbol: String = contract
            .query("symbol", (), None, Options::default(), None)
            .await
            .context("Failed to get token symbol")?;

        Ok(TokenInfo::new(name, symbol, token))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        let decimals: u8 = self
            .contract(token, ERC20_ABI)?
            .query("decimals", (), None, Options::default(), None)
            .await
            .context("Failed to get decimals")?;
        Ok(decimals)
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        let supply: U256 = self
            .contract(token, ERC20_ABI)?
            .query("totalSupply", (), None, Options::default(), None)
            .await
            .context("Failed to get total supply")?;
        Ok(supply)
    }

    async fn send(&self, from: Address, call: ContractCall) -> Result<TxHash> {
        let function = call.function_name();
        let options = Options::default();

        let sent = match call {
            ContractCall::Approve {
                token,
                spender,
                amount,
            } => {
                self.contract(token, ERC20_ABI)?
                    .call(function, (spender, amount), from, options)
                    .await
            }
            ContractCall::AddLiquidity {
                pool,
                amount_a,
                amount_b,
            } => {
                self.contract(pool, POOL_ABI)?
                    .call(function, (amount_a, amount_b), from, options)
                    .await
            }
            ContractCall::PullLiquidity { pool } => {
                self.contract(pool, POOL_ABI)?
                    .call(function, (), from, options)
                    .await
            }
            ContractCall::CreatePool { token_a, token_b } => {
                self.pool_manager()?
                    .call(
                        function,
                        (
                            token_a.name,
                            token_a.symbol,
                            token_a.address,
                            token_b.name,
                            token_b.symbol,
                            token_b.address,
                        ),
                        from,
                        options,
                    )
                    .await
            }
            ContractCall::LaunchToken {
                name,
                symbol,
                initial_supply,
            } => {
                self.launcher()?
                    .call(function, (name, symbol, initial_supply), from, options)
                    .await
            }
            ContractCall::MintExistingToken { token, amount } => {
                self.launcher()?
                    .call(function, (token, amount), from, options)
                    .await
            }
        };

        let hash: H256 = sent.with_context(|| format!("Failed to send {}", function))?;
        info!("Submitted {} from {:?}: {:?}", function, from, hash);
        Ok(hash)
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<TxReceipt>> {
        let receipt = self
            .web3
            .eth()
            .transaction_receipt(hash)
            .await
            .context("Failed to get transaction receipt")?;
        Ok(receipt.map(receipt_from_web3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_tuple_decoding() {
        let address = Address::from_low_u64_be(0xaa);
        let tuple = Token::Tuple(vec![
            Token::String("Wrapped Somnia".to_string()),
            Token::String("WSTT".to_string()),
            Token::Address(address),
        ]);
        let info = token_info_from_tuple(tuple).unwrap();
        assert_eq!(info, TokenInfo::new("Wrapped Somnia", "WSTT", address));

        assert!(token_info_from_tuple(Token::Address(address)).is_err());
        assert!(token_info_from_tuple(Token::Tuple(vec![Token::Address(address)])).is_err());
    }

    #[test]
    fn test_every_abi_parses() {
        for abi in [POOL_MANAGER_ABI, POOL_ABI, TOKEN_LAUNCHER_ABI, ERC20_ABI] {
            assert!(web3::ethabi::Contract::load(abi.as_bytes()).is_ok());
        }
    }
}
