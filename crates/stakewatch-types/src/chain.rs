use rust_decimal::{Decimal, dec};

/// How a chain's stake is held.
///
/// Most chains have a single native staking position. The dual-pool chain
/// (initia) splits stake between a native pool and an LP-token pool; the LP
/// pool's USD value is weighted down because LP tokens are only partially
/// backed by the native token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolLayout {
    Single,
    DualPool { lp_weight: Decimal },
}

/// Static per-chain revenue parameters.
///
/// `commission` is the protocol's cut of staking yield as a fraction,
/// `default_apr` the percent APR assumed when a metric row reports none.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: &'static str,
    pub token_symbol: &'static str,
    pub commission: Decimal,
    pub default_apr: Decimal,
    pub color: &'static str,
    pub pools: PoolLayout,
}

/// Every chain the revenue engine knows about. Chains present in the metric
/// store but absent here are skipped from revenue aggregation.
pub static CHAIN_CONFIGS: [ChainConfig; 4] = [
    ChainConfig {
        name: "hyperliquid",
        token_symbol: "HYPE",
        commission: dec!(0.04),
        default_apr: dec!(2.2),
        color: "#274E40",
        pools: PoolLayout::Single,
    },
    ChainConfig {
        name: "celestia",
        token_symbol: "TIA",
        commission: dec!(0.09),
        default_apr: dec!(12),
        color: "#32145F",
        pools: PoolLayout::Single,
    },
    ChainConfig {
        name: "initia",
        token_symbol: "INIT",
        commission: dec!(0.05),
        default_apr: dec!(0),
        color: "#333333",
        pools: PoolLayout::DualPool {
            lp_weight: dec!(0.8),
        },
    },
    ChainConfig {
        name: "dymension",
        token_symbol: "DYM",
        commission: dec!(0.05),
        default_apr: dec!(4),
        color: "#5E5854",
        pools: PoolLayout::Single,
    },
];

/// Looks up a chain's configuration by name, case-insensitively.
pub fn chain_config(name: &str) -> Option<&'static ChainConfig> {
    CHAIN_CONFIGS
        .iter()
        .find(|config| config.name.eq_ignore_ascii_case(name))
}
