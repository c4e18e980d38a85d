//! Token identifiers and metadata
//!
//! Addresses are accepted only in their canonical string form: `0x` followed
//! by exactly 40 hex characters.

use crate::common::errors::ValidationError;
use ethereum_types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name, symbol and contract address of an ERC-20 token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub address: Address,
}

impl TokenInfo {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            address,
        }
    }

    /// Both name and symbol were resolved from the token contract
    pub fn has_metadata(&self) -> bool {
        !self.name.is_empty() && !self.symbol.is_empty()
    }

    /// Abbreviated address for listings, e.g. `0x1234...abcd`
    pub fn short_address(&self) -> String {
        let full = format_address(&self.address);
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.symbol, self.short_address())
    }
}

/// Two distinct tokens forming a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token_a: TokenInfo,
    pub token_b: TokenInfo,
}

impl TokenPair {
    pub fn new(token_a: TokenInfo, token_b: TokenInfo) -> Result<Self, ValidationError> {
        if token_a.address == token_b.address {
            return Err(ValidationError::IdenticalTokens);
        }
        Ok(Self { token_a, token_b })
    }
}

/// Cheap shape check used while the user is still typing
pub fn is_valid_address(input: &str) -> bool {
    input.len() == 42
        && input.starts_with("0x")
        && input[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a `0x`-prefixed address; the zero address is rejected
pub fn parse_address(input: &str) -> Result<Address, ValidationError> {
    let trimmed = input.trim();
    if !is_valid_address(trimmed) {
        return Err(ValidationError::InvalidAddress {
            input: input.to_string(),
        });
    }

    let bytes = hex::decode(&trimmed[2..]).map_err(|_| ValidationError::InvalidAddress {
        input: input.to_string(),
    })?;
    let address = Address::from_slice(&bytes);
    if address.is_zero() {
        return Err(ValidationError::ZeroAddress);
    }
    Ok(address)
}

/// Lowercase `0x`-prefixed rendering of an address
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}
