//! Default configuration values and constants
//!
//! Used when a setting is absent from every configuration source.

/// Base configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/swapclient.toml";

/// Directory holding `<environment>.toml` overrides
pub const ENVIRONMENTS_DIR: &str = "config/environments";

/// Prefix of environment variable overrides, e.g. `SWAP__CHAIN__RPC_URL`
pub const ENV_PREFIX: &str = "SWAP";

/// Chain defaults (Somnia testnet)
pub mod chain {
    pub const RPC_URL: &str = "https://dream-rpc.somnia.network";
    pub const CHAIN_ID: u64 = 50312;
    pub const EXPLORER_URL: &str = "https://dreamscan.somnia.network";
}

/// Deployed contract defaults
pub mod contracts {
    pub const POOL_MANAGER: &str = "0x5298C714BCA559db2b6129f2170A36DC91EFc0fa";
}

/// Liquidity rule defaults
pub mod liquidity {
    /// Relative tolerance 1/1000 (0.1%)
    pub const TOLERANCE_DIVISOR: u64 = 1_000;

    /// Pool and LP tokens use 18 decimals
    pub const DECIMALS: u8 = 18;

    /// Swap preview fee, 0.3%
    pub const SWAP_FEE_BPS: u32 = 30;
}

/// Polling defaults
pub mod polling {
    /// Reserve refetch interval (milliseconds)
    pub const REFRESH_INTERVAL_MS: u64 = 5_000;

    /// Delay between receipt lookups (milliseconds)
    pub const RECEIPT_POLL_INTERVAL_MS: u64 = 1_000;

    /// Give up waiting for a receipt after (milliseconds)
    pub const RECEIPT_TIMEOUT_MS: u64 = 120_000;
}
