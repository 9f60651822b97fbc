use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Compact per-chain entry for the ticker strip
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TickerChain {
    pub chain: String,
    pub token_symbol: String,
    pub token_usd: Option<Decimal>,
    pub tvl: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TickerResponse {
    /// Protocol-wide staked USD from the latest snapshot, if any
    pub total_stake_usd: Option<Decimal>,
    /// Latest derived annualized revenue across all chains
    pub total_annual_revenue: Decimal,
    pub chains: Vec<TickerChain>,
}
