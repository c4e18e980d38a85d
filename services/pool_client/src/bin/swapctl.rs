//! swapctl
//!
//! Command-line front end for the swap client. `ratio`, `quote` and
//! `swap-preview` work offline; every other command talks to the configured
//! RPC endpoint.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use swap_amm::{
    preview_swap, quote_matching_amount, DepositVerdict, RatioPolicy, RatioTolerance,
    RatioValidator, SwapDirection,
};
use swap_client::{
    resolve_account, AddLiquidity, PoolChain, PoolDirectory, PoolHandle, ReceiptWait,
    RemoveLiquidity, ReserveTracker, RpcPoolChain, TokenLauncher,
};
use swap_config::{load_config, ClientConfig};
use swap_types::{
    format_address, format_units, parse_address, parse_units, Address, DepositProposal,
    ReservePair, U256,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "swapctl", about = "Proportional liquidity client", version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment override (e.g. testnet, local)
    #[arg(short, long, global = true)]
    environment: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a deposit against reserves (offline)
    Ratio {
        #[arg(long)]
        reserve_a: String,
        #[arg(long)]
        reserve_b: String,
        #[arg(long)]
        amount_a: String,
        #[arg(long)]
        amount_b: String,
        #[arg(long)]
        decimals_a: Option<u8>,
        #[arg(long)]
        decimals_b: Option<u8>,
        /// Override the configured policy
        #[arg(long)]
        policy: Option<RatioPolicy>,
        /// Override the configured tolerance divisor
        #[arg(long)]
        tolerance_divisor: Option<u64>,
    },
    /// Token B amount matching a token A amount (offline)
    Quote {
        #[arg(long)]
        reserve_a: String,
        #[arg(long)]
        reserve_b: String,
        #[arg(long)]
        amount_a: String,
        #[arg(long)]
        decimals_a: Option<u8>,
        #[arg(long)]
        decimals_b: Option<u8>,
    },
    /// Estimated output of a swap (offline)
    SwapPreview {
        #[arg(long)]
        reserve_a: String,
        #[arg(long)]
        reserve_b: String,
        #[arg(long)]
        amount_in: String,
        #[arg(long, value_enum, default_value_t = Direction::AToB)]
        direction: Direction,
        #[arg(long)]
        decimals: Option<u8>,
        #[arg(long)]
        fee_bps: Option<u32>,
    },
    /// List every registered token
    Tokens,
    /// List tokens paired with a token
    Pairs {
        #[arg(long)]
        token: String,
    },
    /// Show reserves and LP position of a pool
    Pool {
        #[arg(long)]
        token_a: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        account: Option<String>,
    },
    /// Add liquidity; token B is quoted when omitted
    AddLiquidity {
        #[arg(long)]
        token_a: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        amount_a: String,
        #[arg(long)]
        amount_b: Option<String>,
        #[arg(long)]
        from: Option<String>,
    },
    /// Withdraw the whole LP position
    RemoveLiquidity {
        #[arg(long)]
        token_a: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        from: Option<String>,
    },
    /// Create a pool for two tokens
    CreatePool {
        #[arg(long)]
        token_a: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        from: Option<String>,
    },
    /// Launch a new token
    LaunchToken {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        /// Whole tokens minted to the sender
        #[arg(long)]
        supply: String,
        #[arg(long)]
        from: Option<String>,
    },
    /// Mint more of a launched token
    Mint {
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        from: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    AToB,
    BToA,
}

impl From<Direction> for SwapDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::AToB => SwapDirection::AToB,
            Direction::BToA => SwapDirection::BToA,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.environment.as_deref())
        .context("Failed to load configuration")?;

    match args.command {
        Command::Ratio {
            reserve_a,
            reserve_b,
            amount_a,
            amount_b,
            decimals_a,
            decimals_b,
            policy,
            tolerance_divisor,
        } => {
            let dec_a = decimals_a.unwrap_or(config.liquidity.default_decimals);
            let dec_b = decimals_b.unwrap_or(config.liquidity.default_decimals);
            let configured = config.liquidity.validator()?;
            let validator = RatioValidator::new(
                policy.unwrap_or(configured.policy()),
                match tolerance_divisor {
                    Some(divisor) => RatioTolerance::new(divisor)?,
                    None => configured.tolerance(),
                },
            );

            let reserves = parse_reserves(&reserve_a, &reserve_b, dec_a, dec_b)?;
            let proposal = DepositProposal::parse(&amount_a, &amount_b, dec_a, dec_b)?;
            let check = validator.check(&reserves, &proposal)?;

            println!("policy:     {}", check.policy);
            println!("tolerance:  {}%", validator.tolerance().as_percent());
            println!("deviation:  {}%", check.deviation_percent());
            if let Some(expected) = check.expected_amount_b {
                println!("matching B: {}", format_units(expected, dec_b));
            }
            if check.seeding {
                println!("pool is empty: amounts must be equal");
            }
            let verdict = if check.within {
                "WITHIN tolerance"
            } else {
                "OUT OF tolerance"
            };
            println!("{}", verdict);
        }
        Command::Quote {
            reserve_a,
            reserve_b,
            amount_a,
            decimals_a,
            decimals_b,
        } => {
            let dec_a = decimals_a.unwrap_or(config.liquidity.default_decimals);
            let dec_b = decimals_b.unwrap_or(config.liquidity.default_decimals);
            let reserves = parse_reserves(&reserve_a, &reserve_b, dec_a, dec_b)?;
            let amount_b = quote_matching_amount(&reserves, parse_units(&amount_a, dec_a)?)?;
            println!("{}", format_units(amount_b, dec_b));
        }
        Command::SwapPreview {
            reserve_a,
            reserve_b,
            amount_in,
            direction,
            decimals,
            fee_bps,
        } => {
            let decimals = decimals.unwrap_or(config.liquidity.default_decimals);
            let reserves = parse_reserves(&reserve_a, &reserve_b, decimals, decimals)?;
            let preview = preview_swap(
                &reserves,
                parse_units(&amount_in, decimals)?,
                direction.into(),
                fee_bps.unwrap_or(config.liquidity.swap_fee_bps),
            )?;
            println!("amount out:   {}", format_units(preview.amount_out, decimals));
            println!("price impact: {}%", preview.price_impact_percent());
            println!("fee:          {} bps", preview.fee_bps);
        }
        online => run_online(online, &config).await?,
    }

    Ok(())
}

async fn run_online(command: Command, config: &ClientConfig) -> Result<()> {
    let addresses = config.contracts.addresses()?;
    let chain: Arc<dyn PoolChain> = Arc::new(RpcPoolChain::new(&config.chain, addresses)?);
    let wait = ReceiptWait::from(&config.polling);
    let directory = PoolDirectory::new(chain.clone());
    info!(
        "🔗 Connected to {} (chain {})",
        config.chain.rpc_url, config.chain.chain_id
    );

    match command {
        Command::Tokens => {
            for token in directory.all_tokens().await? {
                println!("{}  {}", format_address(&token.address), token);
            }
        }
        Command::Pairs { token } => {
            for paired in directory.paired_tokens(parse_address(&token)?).await? {
                println!("{}  {}", format_address(&paired.address), paired);
            }
        }
        Command::Pool {
            token_a,
            token_b,
            account,
        } => {
            let handle = open_pool(&directory, &token_a, &token_b).await?;
            let account = account.as_deref().map(parse_address).transpose()?;
            let overview = directory.overview(&handle, account).await?;
            let (reserve_a, reserve_b) = overview.formatted_reserves();

            println!("pool:      {}", format_address(&handle.pool));
            println!(
                "reserves:  {} {} / {} {}",
                reserve_a, handle.token_a.symbol, reserve_b, handle.token_b.symbol
            );
            println!(
                "LP supply: {}",
                format_units(overview.lp_total_supply, overview.lp_decimals)
            );
            if let (Some(balance), Some(share)) =
                (overview.formatted_lp_balance(), overview.pool_share_percent())
            {
                println!("LP held:   {} ({}%)", balance, share);
            }
            let explorer = config.chain.address_url(&format_address(&handle.pool));
            println!("explorer:  {}", explorer);
        }
        Command::AddLiquidity {
            token_a,
            token_b,
            amount_a,
            amount_b,
            from,
        } => {
            let handle = open_pool(&directory, &token_a, &token_b).await?;
            let from = sender(chain.as_ref(), from.as_deref()).await?;
            let tracker = Arc::new(ReserveTracker::new(chain.clone()));
            tracker.select_pool(Some(handle.pool)).await;
            tracker.refresh().await?;

            let add = AddLiquidity::new(
                chain.clone(),
                tracker,
                handle,
                config.liquidity.validator()?,
                wait,
            );
            if let Some(mode) = add.mode() {
                println!("{}", mode);
            }

            add.set_amount_a(&amount_a);
            match amount_b {
                Some(amount_b) => add.set_amount_b(&amount_b),
                None => {
                    if add.refresh_quote().await?.is_none() {
                        bail!("Could not quote token B; pass --amount-b");
                    }
                }
            }
            let (shown_a, shown_b) = add.amounts();
            if let DepositVerdict::Within(check) = add.ratio_verdict() {
                println!("ratio deviation {}%", check.deviation_percent());
            }

            let receipt = add.submit(from).await?;
            println!("added {} / {}", shown_a, shown_b);
            println!("{}", config.chain.tx_url(&format!("{:?}", receipt.hash)));
        }
        Command::RemoveLiquidity {
            token_a,
            token_b,
            from,
        } => {
            let handle = open_pool(&directory, &token_a, &token_b).await?;
            let from = sender(chain.as_ref(), from.as_deref()).await?;
            let withdrawal = RemoveLiquidity::new(chain.clone(), wait)
                .remove_all(handle.pool, from, None)
                .await?;
            println!("removed {} LP", withdrawal.formatted_amount());
            println!("{}", config.chain.tx_url(&format!("{:?}", withdrawal.receipt.hash)));
        }
        Command::CreatePool {
            token_a,
            token_b,
            from,
        } => {
            let from = sender(chain.as_ref(), from.as_deref()).await?;
            let created = directory.create_pool(from, &token_a, &token_b, wait).await?;
            println!(
                "created {}/{} pool",
                created.pair.token_a.symbol, created.pair.token_b.symbol
            );
            if let Some(pool) = created.pool {
                println!("pool: {}", format_address(&pool));
            }
            println!("{}", config.chain.tx_url(&format!("{:?}", created.receipt.hash)));
        }
        Command::LaunchToken {
            name,
            symbol,
            supply,
            from,
        } => {
            let launcher = launcher(chain.clone(), config, wait)?;
            let from = sender(chain.as_ref(), from.as_deref()).await?;
            let supply = U256::from_dec_str(supply.trim())
                .with_context(|| format!("Invalid supply '{}'", supply))?;
            let (launched, receipt) = launcher.launch(from, &name, &symbol, supply).await?;

            println!(
                "launched {} ({}), supply {}",
                launched.name, launched.symbol, launched.initial_supply
            );
            if let Some(address) = launched.address {
                println!("token: {}", format_address(&address));
            }
            println!("{}", config.chain.tx_url(&format!("{:?}", receipt.hash)));
        }
        Command::Mint {
            token,
            amount,
            from,
        } => {
            let launcher = launcher(chain.clone(), config, wait)?;
            let from = sender(chain.as_ref(), from.as_deref()).await?;
            let amount = U256::from_dec_str(amount.trim())
                .with_context(|| format!("Invalid amount '{}'", amount))?;
            let receipt = launcher.mint(from, &token, amount).await?;
            println!("{}", config.chain.tx_url(&format!("{:?}", receipt.hash)));
        }
        offline => bail!("{:?} runs offline", offline),
    }

    Ok(())
}

fn parse_reserves(reserve_a: &str, reserve_b: &str, dec_a: u8, dec_b: u8) -> Result<ReservePair> {
    Ok(ReservePair::new(
        parse_units(reserve_a, dec_a)?,
        parse_units(reserve_b, dec_b)?,
    ))
}

async fn open_pool(directory: &PoolDirectory, token_a: &str, token_b: &str) -> Result<PoolHandle> {
    let token_a = parse_address(token_a)?;
    let token_b = parse_address(token_b)?;
    match directory.open_pool(token_a, token_b).await? {
        Some(handle) => Ok(handle),
        None => bail!("No pool exists for this token pair"),
    }
}

async fn sender(chain: &dyn PoolChain, from: Option<&str>) -> Result<Address> {
    let explicit = from.map(parse_address).transpose()?;
    Ok(resolve_account(chain, explicit).await?)
}

fn launcher(
    chain: Arc<dyn PoolChain>,
    config: &ClientConfig,
    wait: ReceiptWait,
) -> Result<TokenLauncher> {
    let Some(address) = config.contracts.addresses()?.token_launcher else {
        bail!("contracts.token_launcher is not configured");
    };
    Ok(TokenLauncher::new(chain, address, wait))
}
