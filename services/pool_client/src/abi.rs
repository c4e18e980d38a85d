//! Contract ABIs, limited to the functions and events the client uses

/// Pool manager: token registry, pool lookup and creation
pub const POOL_MANAGER_ABI: &str = r#"[
    {"type":"function","name":"getAllTokens","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"tuple[]","components":[{"name":"name","type":"string"},{"name":"symbol","type":"string"},{"name":"tokenAddress","type":"address"}]}]},
    {"type":"function","name":"getPairedTokenInfobyAddress","stateMutability":"view","inputs":[{"name":"token","type":"address"}],"outputs":[{"name":"","type":"tuple[]","components":[{"name":"name","type":"string"},{"name":"symbol","type":"string"},{"name":"tokenAddress","type":"address"}]}]},
    {"type":"function","name":"getPoolAddress","stateMutability":"view","inputs":[{"name":"tokenA","type":"address"},{"name":"tokenB","type":"address"}],"outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"createPool","stateMutability":"nonpayable","inputs":[{"name":"tokenAName","type":"string"},{"name":"tokenASymbol","type":"string"},{"name":"tokenA","type":"address"},{"name":"tokenBName","type":"string"},{"name":"tokenBSymbol","type":"string"},{"name":"tokenB","type":"address"}],"outputs":[{"name":"poolAddr","type":"address"}]},
    {"type":"event","name":"PoolCreated","anonymous":false,"inputs":[{"name":"tokenA","type":"address","indexed":false},{"name":"tokenB","type":"address","indexed":false},{"name":"lpToken","type":"address","indexed":false},{"name":"pool","type":"address","indexed":false}]}
]"#;

/// Liquidity pool for one token pair
pub const POOL_ABI: &str = r#"[
    {"type":"function","name":"getPoolReserves","stateMutability":"view","inputs":[],"outputs":[{"name":"reserveA","type":"uint256"},{"name":"reserveB","type":"uint256"}]},
    {"type":"function","name":"liquidityQuote","stateMutability":"view","inputs":[{"name":"amountA","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}]},
    {"type":"function","name":"getPoolTokenShare","stateMutability":"view","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
    {"type":"function","name":"getPoolTokenAddress","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"addLiquidity","stateMutability":"nonpayable","inputs":[{"name":"amountA","type":"uint256"},{"name":"amountB","type":"uint256"}],"outputs":[]},
    {"type":"function","name":"pullLiquidityAsLp","stateMutability":"nonpayable","inputs":[],"outputs":[]}
]"#;

/// Token launcher: deploys and mints simple ERC-20 tokens
pub const TOKEN_LAUNCHER_ABI: &str = r#"[
    {"type":"function","name":"launchToken","stateMutability":"nonpayable","inputs":[{"name":"name","type":"string"},{"name":"symbol","type":"string"},{"name":"initialSupply","type":"uint256"}],"outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"mintExistingToken","stateMutability":"nonpayable","inputs":[{"name":"token","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[]},
    {"type":"event","name":"TokenLaunched","anonymous":false,"inputs":[{"name":"token","type":"address","indexed":true},{"name":"name","type":"string","indexed":false},{"name":"symbol","type":"string","indexed":false},{"name":"initialSupply","type":"uint256","indexed":false},{"name":"owner","type":"address","indexed":true}]}
]"#;

/// ERC-20 subset
pub const ERC20_ABI: &str = r#"[
    {"constant":true,"inputs":[],"name":"name","outputs":[{"name":"","type":"string"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"symbol","outputs":[{"name":"","type":"string"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"decimals","outputs":[{"name":"","type":"uint8"}],"type":"function"},
    {"constant":true,"inputs":[],"name":"totalSupply","outputs":[{"name":"","type":"uint256"}],"type":"function"},
    {"constant":false,"inputs":[{"name":"spender","type":"address"},{"name":"amount","type":"uint256"}],"name":"approve","outputs":[{"name":"","type":"bool"}],"type":"function"}
]"#;
