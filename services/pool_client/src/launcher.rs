//! Token launcher: deploy new tokens and mint more of existing ones

use anyhow::Context;
use std::sync::Arc;
use swap_types::{format_address, parse_address, Address, U256};
use tracing::{debug, info, warn};
use web3::ethabi::{self, RawLog, Token};

use crate::abi::TOKEN_LAUNCHER_ABI;
use crate::chain::{wait_for_receipt, ContractCall, PoolChain, ReceiptWait, TxReceipt};
use crate::errors::{ClientError, Result};

/// Token created by `launchToken`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedToken {
    /// Unknown when the receipt carried no `TokenLaunched` event
    pub address: Option<Address>,
    pub owner: Option<Address>,
    pub name: String,
    pub symbol: String,
    pub initial_supply: U256,
}

/// Decode the first `TokenLaunched` event emitted by `launcher`
pub fn decode_token_launched(
    receipt: &TxReceipt,
    launcher: Address,
) -> anyhow::Result<Option<LaunchedToken>> {
    let abi = ethabi::Contract::load(TOKEN_LAUNCHER_ABI.as_bytes())
        .context("Failed to load launcher ABI")?;
    let event = abi
        .event("TokenLaunched")
        .context("Launcher ABI has no TokenLaunched event")?;
    let signature = event.signature();

    let Some(log) = receipt
        .logs
        .iter()
        .find(|log| log.address == launcher && log.topics.first() == Some(&signature))
    else {
        return Ok(None);
    };

    let parsed = event
        .parse_log(RawLog {
            topics: log.topics.clone(),
            data: log.data.clone(),
        })
        .context("Malformed TokenLaunched event")?;

    let mut launched = LaunchedToken {
        address: None,
        owner: None,
        name: String::new(),
        symbol: String::new(),
        initial_supply: U256::zero(),
    };
    for param in parsed.params {
        match (param.name.as_str(), param.value) {
            ("token", Token::Address(address)) => launched.address = Some(address),
            ("owner", Token::Address(owner)) => launched.owner = Some(owner),
            ("name", Token::String(name)) => launched.name = name,
            ("symbol", Token::String(symbol)) => launched.symbol = symbol,
            ("initialSupply", Token::Uint(supply)) => launched.initial_supply = supply,
            (other, value) => debug!("Ignoring TokenLaunched field {}: {:?}", other, value),
        }
    }
    Ok(Some(launched))
}

pub struct TokenLauncher {
    chain: Arc<dyn PoolChain>,
    launcher: Address,
    wait: ReceiptWait,
}

impl TokenLauncher {
    pub fn new(chain: Arc<dyn PoolChain>, launcher: Address, wait: ReceiptWait) -> Self {
        Self {
            chain,
            launcher,
            wait,
        }
    }

    /// Deploy a token with `initial_supply` whole tokens minted to `from`
    pub async fn launch(
        &self,
        from: Address,
        name: &str,
        symbol: &str,
        initial_supply: U256,
    ) -> Result<(LaunchedToken, TxReceipt)> {
        let name = name.trim();
        let symbol = symbol.trim();
        if name.is_empty() || symbol.is_empty() {
            return Err(ClientError::InvalidInput(
                "Token name and symbol are required".to_string(),
            ));
        }
        if initial_supply.is_zero() {
            return Err(ClientError::ZeroAmount);
        }

        let hash = self
            .chain
            .send(
                from,
                ContractCall::LaunchToken {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    initial_supply,
                },
            )
            .await?;
        let receipt = wait_for_receipt(self.chain.as_ref(), hash, self.wait).await?;

        let decoded = match decode_token_launched(&receipt, self.launcher) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Could not decode TokenLaunched: {:#}", e);
                None
            }
        };
        let mut launched = decoded.unwrap_or_else(|| LaunchedToken {
            address: None,
            owner: Some(from),
            name: String::new(),
            symbol: String::new(),
            initial_supply: U256::zero(),
        });
        // Event fields win; blanks fall back to what was submitted
        if launched.name.is_empty() {
            launched.name = name.to_string();
        }
        if launched.symbol.is_empty() {
            launched.symbol = symbol.to_string();
        }
        if launched.initial_supply.is_zero() {
            launched.initial_supply = initial_supply;
        }

        match launched.address {
            Some(address) => info!(
                "Launched {} ({}) at {}",
                launched.name,
                launched.symbol,
                format_address(&address)
            ),
            None => warn!(
                "Launched {} ({}) but the token address was not reported",
                launched.name, launched.symbol
            ),
        }
        Ok((launched, receipt))
    }

    /// Mint `amount` more of an existing launcher token to `from`
    pub async fn mint(&self, from: Address, token: &str, amount: U256) -> Result<TxReceipt> {
        let token = parse_address(token)?;
        if amount.is_zero() {
            return Err(ClientError::ZeroAmount);
        }

        let hash = self
            .chain
            .send(from, ContractCall::MintExistingToken { token, amount })
            .await?;
        let receipt = wait_for_receipt(self.chain.as_ref(), hash, self.wait).await?;
        info!("Minted {} of {}", amount, format_address(&token));
        Ok(receipt)
    }
}
