//! Client Configuration Module
//!
//! Provides configuration loading for the swap client.
//! Supports loading from TOML files with environment-specific overrides.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use swap_amm::{RatioPolicy, RatioTolerance, RatioValidator};
use swap_types::{parse_address, Address};
use tracing::{info, warn};

use crate::defaults;

/// Main client configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub chain: ChainSettings,
    pub contracts: ContractSettings,
    pub liquidity: LiquiditySettings,
    pub polling: PollingSettings,
}

/// Chain connection settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChainSettings {
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: String,
}

/// Contract addresses as written in the configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ContractSettings {
    pub pool_manager: String,
    pub token_launcher: Option<String>,
}

/// Validated contract addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub pool_manager: Address,
    pub token_launcher: Option<Address>,
}

/// Deposit validation and preview settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LiquiditySettings {
    pub ratio_policy: RatioPolicy,
    pub tolerance_divisor: u64,
    pub default_decimals: u8,
    pub swap_fee_bps: u32,
}

/// Refresh and receipt polling settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PollingSettings {
    pub refresh_interval_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_ms: u64,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            rpc_url: defaults::chain::RPC_URL.to_string(),
            chain_id: defaults::chain::CHAIN_ID,
            explorer_url: defaults::chain::EXPLORER_URL.to_string(),
        }
    }
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            pool_manager: defaults::contracts::POOL_MANAGER.to_string(),
            token_launcher: None,
        }
    }
}

impl Default for LiquiditySettings {
    fn default() -> Self {
        Self {
            ratio_policy: RatioPolicy::CrossProduct,
            tolerance_divisor: defaults::liquidity::TOLERANCE_DIVISOR,
            default_decimals: defaults::liquidity::DECIMALS,
            swap_fee_bps: defaults::liquidity::SWAP_FEE_BPS,
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: defaults::polling::REFRESH_INTERVAL_MS,
            receipt_poll_interval_ms: defaults::polling::RECEIPT_POLL_INTERVAL_MS,
            receipt_timeout_ms: defaults::polling::RECEIPT_TIMEOUT_MS,
        }
    }
}

impl ChainSettings {
    /// Explorer link for a transaction hash
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Explorer link for an address
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), address)
    }
}

impl ContractSettings {
    /// Parse and validate the configured addresses
    pub fn addresses(&self) -> Result<ContractAddresses> {
        let pool_manager = parse_address(&self.pool_manager)
            .with_context(|| format!("Invalid pool_manager address '{}'", self.pool_manager))?;
        let token_launcher = self
            .token_launcher
            .as_deref()
            .map(|raw| {
                parse_address(raw)
                    .with_context(|| format!("Invalid token_launcher address '{}'", raw))
            })
            .transpose()?;

        Ok(ContractAddresses {
            pool_manager,
            token_launcher,
        })
    }
}

impl LiquiditySettings {
    /// Ratio validator for the configured policy and tolerance
    pub fn validator(&self) -> Result<RatioValidator> {
        let tolerance = RatioTolerance::new(self.tolerance_divisor)
            .context("liquidity.tolerance_divisor must be positive")?;
        Ok(RatioValidator::new(self.ratio_policy, tolerance))
    }
}

impl PollingSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_millis(self.receipt_timeout_ms)
    }
}

impl ClientConfig {
    /// Load configuration from files with environment overrides
    ///
    /// A missing base file is tolerated and leaves every default in place.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(defaults::DEFAULT_CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(false));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = PathBuf::from(defaults::ENVIRONMENTS_DIR).join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (SWAP__SECTION__KEY)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Expand environment variables in the RPC URL
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let expanded =
            shellexpand::env(&self.chain.rpc_url).context("Failed to expand RPC URL")?;
        self.chain.rpc_url = expanded.to_string();
        Ok(())
    }

    /// Check every setting that can be wrong independently of the chain
    pub fn validate(&self) -> Result<()> {
        self.contracts.addresses()?;
        self.liquidity.validator()?;
        if self.liquidity.swap_fee_bps >= 10_000 {
            anyhow::bail!(
                "liquidity.swap_fee_bps must be below 10000, got {}",
                self.liquidity.swap_fee_bps
            );
        }
        if self.polling.receipt_poll_interval_ms == 0 {
            anyhow::bail!("polling.receipt_poll_interval_ms must be positive");
        }
        Ok(())
    }

    /// Render as TOML, e.g. to write a starter file
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load, expand and validate configuration
pub fn load_config(base_path: Option<&Path>, environment: Option<&str>) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(base_path, environment)?;
    config.expand_env_vars()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::load(Some(&dir.path().join("absent.toml")), None).unwrap();

        assert_eq!(config.chain.chain_id, defaults::chain::CHAIN_ID);
        assert_eq!(config.liquidity.tolerance_divisor, 1_000);
        assert_eq!(config.liquidity.ratio_policy, RatioPolicy::CrossProduct);
        assert_eq!(config.polling.refresh_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("swapclient.toml");

        let config_content = r#"
[chain]
rpc_url = "http://localhost:8545"
chain_id = 31337

[contracts]
pool_manager = "0x00000000000000000000000000000000000000aa"
token_launcher = "0x00000000000000000000000000000000000000bb"

[liquidity]
ratio_policy = "normalized"
tolerance_divisor = 500
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = ClientConfig::load(Some(&config_path), None).unwrap();

        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain.chain_id, 31337);
        // Untouched keys keep their defaults
        assert_eq!(config.chain.explorer_url, defaults::chain::EXPLORER_URL);
        assert_eq!(config.liquidity.default_decimals, 18);

        let validator = config.liquidity.validator().unwrap();
        assert_eq!(validator.policy(), RatioPolicy::Normalized);
        assert_eq!(validator.tolerance().divisor(), 500);

        let addresses = config.contracts.addresses().unwrap();
        assert_eq!(addresses.pool_manager, Address::from_low_u64_be(0xaa));
        assert_eq!(addresses.token_launcher, Some(Address::from_low_u64_be(0xbb)));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ClientConfig::default();
        config.contracts.pool_manager = "0x1234".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.liquidity.tolerance_divisor = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.liquidity.swap_fee_bps = 10_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("SWAP_CONFIG_TEST_RPC_HOST", "rpc.example.org");
        let mut config = ClientConfig::default();
        config.chain.rpc_url = "https://${SWAP_CONFIG_TEST_RPC_HOST}/v1".to_string();
        config.expand_env_vars().unwrap();
        assert_eq!(config.chain.rpc_url, "https://rpc.example.org/v1");
    }

    #[test]
    fn test_explorer_links() {
        let chain = ChainSettings::default();
        assert_eq!(
            chain.tx_url("0xabc"),
            format!("{}/tx/0xabc", defaults::chain::EXPLORER_URL)
        );
        assert!(chain.address_url("0xdef").ends_with("/address/0xdef"));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = ClientConfig::default().to_toml().unwrap();
        let parsed: ClientConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.chain.rpc_url, defaults::chain::RPC_URL);
        assert_eq!(parsed.contracts.pool_manager, defaults::contracts::POOL_MANAGER);
    }
}
