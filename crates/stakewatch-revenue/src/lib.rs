pub mod apr;
pub mod cumulative;
pub mod daily;
pub mod spot;
pub mod window;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use stakewatch_db::models::HistoricalMetric;
use stakewatch_types::ChainConfig;

pub use apr::{AprQuote, resolve_apr_loose, resolve_apr_strict};
pub use cumulative::{CumulativePoint, calculate_cumulative_revenue};
pub use daily::{ChainDayRevenue, DailyRevenue, calculate_daily_revenue};
pub use spot::latest_spot_prices;
pub use window::{filter_window_by, window_start};

/// Everything derived from one frozen read of the metric store.
///
/// Spot prices are resolved first from the same row set, then reused by the
/// daily pass and the cumulative fold so all three views share one valuation
/// basis.
#[derive(Debug, Clone)]
pub struct RevenueReport {
    pub daily: Vec<DailyRevenue>,
    pub cumulative: Vec<CumulativePoint>,
    pub spot_prices: BTreeMap<String, Decimal>,
}

/// Run the full derivation over an ascending row set.
///
/// Pure function of the rows and the chain table: no clock reads, no IO, no
/// hidden state. Callers re-derive from scratch on every request; nothing is
/// cached between passes.
pub fn calculate_revenue_report(
    rows: &[HistoricalMetric],
    configs: &[ChainConfig],
) -> RevenueReport {
    let spot_prices = latest_spot_prices(rows, configs);
    let daily = calculate_daily_revenue(rows, configs, &spot_prices);
    let cumulative = calculate_cumulative_revenue(&daily, configs, &spot_prices);

    RevenueReport {
        daily,
        cumulative,
        spot_prices,
    }
}

/// Latest per-chain revenue cards plus protocol totals.
#[derive(Debug, Clone)]
pub struct RevenueSummary {
    pub date: NaiveDate,
    /// Annualized protocol revenue summed over chains, from the last day.
    pub total_annual_revenue: Decimal,
    /// USD value of the last day's native-token earnings at latest prices.
    pub total_daily_usd: Decimal,
    pub per_chain: BTreeMap<String, ChainDayRevenue>,
}

/// Summarize the last derived day, or `None` for an empty history.
pub fn calculate_revenue_summary(
    report: &RevenueReport,
    configs: &[ChainConfig],
) -> Option<RevenueSummary> {
    let last = report.daily.last()?;

    let mut total_daily_usd = Decimal::ZERO;
    for (chain, entry) in &last.per_chain {
        let Some(config) = configs
            .iter()
            .find(|config| config.name == chain.as_str())
        else {
            continue;
        };
        if let Some(price) = report.spot_prices.get(config.token_symbol) {
            total_daily_usd += entry.daily_native_tokens * price;
        }
    }

    Some(RevenueSummary {
        date: last.date,
        total_annual_revenue: last.total_daily_revenue,
        total_daily_usd,
        per_chain: last.per_chain.clone(),
    })
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{DateTime, Utc};
    use rust_decimal::{Decimal, dec};
    use stakewatch_db::models::HistoricalMetric;
    use stakewatch_types::{ChainConfig, PoolLayout};

    pub(crate) struct RowBuilder {
        row: HistoricalMetric,
    }

    pub(crate) fn row(chain: &str, metric_type: &str, timestamp: &str) -> RowBuilder {
        RowBuilder {
            row: HistoricalMetric {
                id: 0,
                chain: chain.to_string(),
                metric_type: metric_type.to_string(),
                timestamp: timestamp.parse::<DateTime<Utc>>().unwrap(),
                value: None,
                value_usd: None,
                apr: None,
                token_usd: None,
                source: Some("test".to_string()),
                created_at: None,
            },
        }
    }

    impl RowBuilder {
        pub(crate) fn value_usd(mut self, value_usd: Decimal) -> Self {
            self.row.value_usd = Some(value_usd);
            self
        }

        pub(crate) fn apr(mut self, apr: Decimal) -> Self {
            self.row.apr = Some(apr);
            self
        }

        pub(crate) fn token_usd(mut self, token_usd: Decimal) -> Self {
            self.row.token_usd = Some(token_usd);
            self
        }

        pub(crate) fn build(self) -> HistoricalMetric {
            self.row
        }
    }

    pub(crate) fn test_configs() -> Vec<ChainConfig> {
        vec![
            ChainConfig {
                name: "alpha",
                token_symbol: "ALP",
                commission: dec!(0.04),
                default_apr: dec!(2.2),
                color: "#111111",
                pools: PoolLayout::Single,
            },
            ChainConfig {
                name: "beta",
                token_symbol: "BET",
                commission: dec!(0.09),
                default_apr: dec!(12),
                color: "#222222",
                pools: PoolLayout::Single,
            },
            ChainConfig {
                name: "gamma",
                token_symbol: "GAM",
                commission: dec!(0.05),
                default_apr: dec!(4),
                color: "#333333",
                pools: PoolLayout::DualPool {
                    lp_weight: dec!(0.8),
                },
            },
        ]
    }
}
