use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use stakewatch_revenue::{AprQuote, ChainDayRevenue, DailyRevenue};
use utoipa::ToSchema;

/// One chain's derived revenue figures for one day
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainRevenueEntry {
    /// Annualized protocol revenue in USD given that day's stake and APR
    pub annual_revenue: Decimal,
    pub tvl: Decimal,
    /// Resolved APR quote, `"N/A"` when the chain reported no usable stake
    #[schema(value_type = String)]
    pub apr: AprQuote,
    /// One day's revenue converted to the chain's native token
    pub daily_native_tokens: Decimal,
}

impl From<ChainDayRevenue> for ChainRevenueEntry {
    fn from(entry: ChainDayRevenue) -> Self {
        Self {
            annual_revenue: entry.annual_revenue,
            tvl: entry.tvl,
            apr: entry.apr,
            daily_native_tokens: entry.daily_native_tokens,
        }
    }
}

/// Derived revenue for one calendar day across all configured chains
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyRevenuePoint {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
    pub total_daily_revenue: Decimal,
    pub per_chain: BTreeMap<String, ChainRevenueEntry>,
}

impl From<DailyRevenue> for DailyRevenuePoint {
    fn from(day: DailyRevenue) -> Self {
        Self {
            date: day.date.to_string(),
            total_daily_revenue: day.total_daily_revenue,
            per_chain: day
                .per_chain
                .into_iter()
                .map(|(chain, entry)| (chain, entry.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueSeriesResponse {
    pub window: String,
    pub points: Vec<DailyRevenuePoint>,
}

/// Running USD value of everything earned up to and including `date`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CumulativeRevenuePoint {
    pub date: String,
    pub cumulative_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CumulativeRevenueResponse {
    pub window: String,
    pub points: Vec<CumulativeRevenuePoint>,
}

/// Latest revenue card for one chain, enriched with its display config
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainRevenueCard {
    pub chain: String,
    pub token_symbol: String,
    pub color: String,
    pub annual_revenue: Decimal,
    pub tvl: Decimal,
    #[schema(value_type = String)]
    pub apr: AprQuote,
    pub daily_native_tokens: Decimal,
    /// Latest known USD spot price for the chain's token
    pub token_usd: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueLatestResponse {
    /// Day the figures were derived from, `YYYY-MM-DD`
    pub date: String,
    pub total_annual_revenue: Decimal,
    /// USD value of the latest day's native-token earnings
    pub total_daily_usd: Decimal,
    pub chains: Vec<ChainRevenueCard>,
}
