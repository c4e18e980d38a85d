//! # Swap Client Configuration
//!
//! Centralized configuration and defaults for the swap client.
//!
//! ## Features
//!
//! - **Chain Settings**: RPC endpoint, chain id, block explorer
//! - **Contract Addresses**: pool manager and token launcher
//! - **Liquidity Rules**: ratio policy, tolerance, decimals, swap fee
//! - **Polling**: reserve refresh interval, receipt polling and timeout
//!
//! ## Usage
//!
//! ```rust,no_run
//! use swap_config::{load_config, defaults};
//!
//! let config = load_config(None, Some("testnet")).unwrap();
//! let validator = config.liquidity.validator().unwrap();
//! assert_eq!(defaults::ENV_PREFIX, "SWAP");
//! ```

pub mod client_config;
pub mod defaults;

// Re-export commonly used types
pub use client_config::{
    load_config, ChainSettings, ClientConfig, ContractAddresses, ContractSettings,
    LiquiditySettings, PollingSettings,
};
