use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Latest observed state of one configured chain
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainListItem {
    pub chain: String,
    pub token_symbol: String,
    /// Dashboard accent color, hex
    pub color: String,
    pub dual_pool: bool,
    /// Latest staked amount in whole native tokens
    pub total_stake: Option<Decimal>,
    pub total_stake_usd: Option<Decimal>,
    /// Latest reported APR in percent, falling back to the configured default
    pub apr: Option<Decimal>,
    pub token_usd: Option<Decimal>,
    pub delegators: Option<Decimal>,
    /// RFC3339 timestamp of the latest stake row, absent for never-ingested
    /// chains
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainListResponse {
    pub items: Vec<ChainListItem>,
}

/// One raw metric observation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainSeriesPoint {
    /// RFC3339 timestamp
    pub t: String,
    pub value: Option<Decimal>,
    pub value_usd: Option<Decimal>,
    pub apr: Option<Decimal>,
    pub token_usd: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainSeriesResponse {
    pub chain: String,
    pub metric: String,
    pub window: String,
    pub points: Vec<ChainSeriesPoint>,
}
