use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::{Decimal, dec};
use stakewatch_db::models::HistoricalMetric;
use stakewatch_types::{ChainConfig, MetricKind, PoolLayout};

use crate::apr::{AprQuote, resolve_apr_loose, resolve_apr_strict};

const DAYS_PER_YEAR: Decimal = dec!(365);

/// One chain's derived revenue figures for one day.
///
/// `annual_revenue` is the annualized protocol cut given that day's stake and
/// APR; `daily_native_tokens` is one day's worth of that revenue converted to
/// the chain's native token at the latest known spot price.
#[derive(Debug, Clone)]
pub struct ChainDayRevenue {
    pub annual_revenue: Decimal,
    pub tvl: Decimal,
    pub apr: AprQuote,
    pub daily_native_tokens: Decimal,
}

impl ChainDayRevenue {
    /// Zero-valued entry for a chain with no usable stake row that day.
    /// Absence is zero, never omission from the per-chain map.
    const fn missing() -> Self {
        Self {
            annual_revenue: Decimal::ZERO,
            tvl: Decimal::ZERO,
            apr: AprQuote::Missing,
            daily_native_tokens: Decimal::ZERO,
        }
    }
}

/// Derived revenue for one calendar day across all configured chains.
///
/// `total_daily_revenue` is the sum of `per_chain` annual revenues, kept as
/// its own field so chart consumers never re-aggregate.
#[derive(Debug, Clone)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub total_daily_revenue: Decimal,
    pub per_chain: BTreeMap<String, ChainDayRevenue>,
}

type DayBuckets<'a> =
    BTreeMap<NaiveDate, HashMap<String, HashMap<MetricKind, &'a HistoricalMetric>>>;

/// Derive the per-day revenue series from a frozen, ascending row set.
///
/// Rows are bucketed by UTC calendar day and lowercase chain name, then
/// indexed by metric type with last-write-wins on duplicates. Every config
/// entry appears in every day's `per_chain` map; chains found in the data but
/// missing from `configs` are skipped and logged once per pass.
///
/// NOTE: rows must be pre-sorted in chronological order (oldest first)
pub fn calculate_daily_revenue(
    rows: &[HistoricalMetric],
    configs: &[ChainConfig],
    spot_prices: &BTreeMap<String, Decimal>,
) -> Vec<DailyRevenue> {
    debug_assert!(
        rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp),
        "Metric rows must be sorted in chronological order"
    );

    let mut days: DayBuckets<'_> = BTreeMap::new();
    let mut unconfigured: HashSet<String> = HashSet::new();

    for row in rows {
        let chain = row.chain.to_lowercase();
        if !configs.iter().any(|config| config.name == chain) {
            unconfigured.insert(chain);
            continue;
        }
        let Ok(kind) = row.metric_type.parse::<MetricKind>() else {
            tracing::debug!(metric_type = %row.metric_type, "Ignoring unknown metric type");
            continue;
        };
        days.entry(row.timestamp.date_naive())
            .or_default()
            .entry(chain)
            .or_default()
            .insert(kind, row);
    }

    if !unconfigured.is_empty() {
        let mut names: Vec<_> = unconfigured.into_iter().collect();
        names.sort();
        tracing::warn!(
            "[Revenue] ⏭️ Skipping chains without configuration: {}",
            names.join(", ")
        );
    }

    days.into_iter()
        .map(|(date, chains)| {
            let mut per_chain = BTreeMap::new();
            let mut total_daily_revenue = Decimal::ZERO;

            for config in configs {
                let bucket = chains.get(config.name);
                let entry = match config.pools {
                    PoolLayout::Single => derive_single_chain(config, bucket, spot_prices),
                    PoolLayout::DualPool { .. } => {
                        derive_dual_pool_chain(config, bucket, spot_prices)
                    }
                };
                total_daily_revenue += entry.annual_revenue;
                per_chain.insert(config.name.to_string(), entry);
            }

            DailyRevenue {
                date,
                total_daily_revenue,
                per_chain,
            }
        })
        .collect()
}

fn derive_single_chain(
    config: &ChainConfig,
    bucket: Option<&HashMap<MetricKind, &HistoricalMetric>>,
    spot_prices: &BTreeMap<String, Decimal>,
) -> ChainDayRevenue {
    let Some(stake) = bucket.and_then(|metrics| metrics.get(&MetricKind::TotalStake).copied())
    else {
        return ChainDayRevenue::missing();
    };
    let Some(value_usd) = stake.value_usd.filter(|v| !v.is_zero()) else {
        return ChainDayRevenue::missing();
    };

    // Canonical path: an explicit 0 APR is a real value, only null falls back.
    let apr = resolve_apr_strict(stake.apr, config.default_apr);
    let annual_revenue = value_usd * (apr / dec!(100)) * config.commission;
    let daily_native_tokens =
        accrue_native_tokens(annual_revenue, spot_prices.get(config.token_symbol));

    ChainDayRevenue {
        annual_revenue,
        tvl: value_usd,
        apr: AprQuote::Rate(apr),
        daily_native_tokens,
    }
}

fn derive_dual_pool_chain(
    config: &ChainConfig,
    bucket: Option<&HashMap<MetricKind, &HistoricalMetric>>,
    spot_prices: &BTreeMap<String, Decimal>,
) -> ChainDayRevenue {
    let Some(metrics) = bucket else {
        return ChainDayRevenue::missing();
    };

    let mut annual_revenue = Decimal::ZERO;
    let mut tvl = Decimal::ZERO;
    let mut daily_native_tokens = Decimal::ZERO;
    let mut init_apr = None;
    let mut lp_apr = None;

    for (kind, quoted_apr) in [
        (MetricKind::TotalStakeInit, &mut init_apr),
        (MetricKind::TotalStakeLp, &mut lp_apr),
    ] {
        let Some(row) = metrics.get(&kind).copied() else {
            continue;
        };
        let Some(value_usd) = row.value_usd.filter(|v| !v.is_zero()) else {
            continue;
        };

        // Sub-positions use the loose convention: a reported 0 falls back too.
        let apr = resolve_apr_loose(row.apr, config.default_apr);
        let contribution = value_usd * (apr / dec!(100)) * config.commission;
        annual_revenue += contribution;
        tvl += value_usd;
        daily_native_tokens +=
            accrue_native_tokens(contribution, spot_prices.get(config.token_symbol));
        *quoted_apr = Some(apr);
    }

    ChainDayRevenue {
        annual_revenue,
        tvl,
        apr: AprQuote::DualBand {
            init: init_apr,
            lp: lp_apr,
        },
        daily_native_tokens,
    }
}

/// One day of revenue in native tokens, valued at the latest spot price.
/// Without a positive price the accrual is skipped, never an error.
fn accrue_native_tokens(contribution: Decimal, spot_price: Option<&Decimal>) -> Decimal {
    match spot_price {
        Some(price) if *price > Decimal::ZERO => (contribution / DAYS_PER_YEAR) / *price,
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{row, test_configs};
    use std::collections::BTreeMap;

    fn no_prices() -> BTreeMap<String, Decimal> {
        BTreeMap::new()
    }

    #[test]
    fn test_standard_chain_revenue_with_fallback_apr() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T00:30:00Z")
                .value_usd(dec!(1000000))
                .build(),
            row("beta", "total_stake", "2024-01-01T00:31:00Z")
                .value_usd(dec!(500000))
                .apr(dec!(10))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        assert_eq!(daily.len(), 1);

        let day = &daily[0];
        assert_eq!(day.per_chain["alpha"].annual_revenue, dec!(880));
        assert_eq!(day.per_chain["beta"].annual_revenue, dec!(4500));
        assert_eq!(day.total_daily_revenue, dec!(5380));
        assert_eq!(day.per_chain["alpha"].apr, AprQuote::Rate(dec!(2.2)));
        assert_eq!(day.per_chain["beta"].apr, AprQuote::Rate(dec!(10)));
    }

    #[test]
    fn test_absent_chain_is_zero_not_omitted() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T12:00:00Z")
                .value_usd(dec!(1000))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let day = &daily[0];

        assert_eq!(day.per_chain.len(), configs.len());
        assert_eq!(day.per_chain["beta"].annual_revenue, Decimal::ZERO);
        assert_eq!(day.per_chain["beta"].tvl, Decimal::ZERO);
        assert_eq!(day.per_chain["beta"].apr, AprQuote::Missing);
    }

    #[test]
    fn test_total_is_sum_of_chain_revenues() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T01:00:00Z")
                .value_usd(dec!(123456.78))
                .apr(dec!(3.3))
                .build(),
            row("beta", "total_stake", "2024-01-01T02:00:00Z")
                .value_usd(dec!(87654.32))
                .build(),
            row("alpha", "total_stake", "2024-01-02T01:00:00Z")
                .value_usd(dec!(150000))
                .build(),
            row("gamma", "total_stake_init", "2024-01-02T02:00:00Z")
                .value_usd(dec!(42000))
                .apr(dec!(8))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        assert_eq!(daily.len(), 2);

        for day in &daily {
            let sum: Decimal = day
                .per_chain
                .values()
                .map(|entry| entry.annual_revenue)
                .sum();
            assert_eq!(sum, day.total_daily_revenue);
        }
    }

    #[test]
    fn test_dual_pool_chain_sums_both_positions() {
        let configs = test_configs();
        let rows = vec![
            row("gamma", "total_stake_init", "2024-01-01T00:00:00Z")
                .value_usd(dec!(2000000))
                .apr(dec!(20))
                .build(),
            row("gamma", "total_stake_lp", "2024-01-01T00:00:00Z")
                .value_usd(dec!(1000000))
                .apr(dec!(120))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let gamma = &daily[0].per_chain["gamma"];

        // 2M * 20% * 5% + 1M * 120% * 5%
        assert_eq!(gamma.annual_revenue, dec!(80000));
        assert_eq!(gamma.tvl, dec!(3000000));
        assert_eq!(
            serde_json::to_value(&gamma.apr).unwrap(),
            serde_json::json!("20.00% - 120.00%")
        );
    }

    #[test]
    fn test_apr_fallback_asymmetry() {
        let configs = test_configs();
        let rows = vec![
            // Standard chain reporting 0 APR keeps it: zero revenue.
            row("alpha", "total_stake", "2024-01-01T00:00:00Z")
                .value_usd(dec!(1000))
                .apr(dec!(0))
                .build(),
            // Dual-pool sub-position reporting 0 APR falls back to the
            // default (4) instead.
            row("gamma", "total_stake_init", "2024-01-01T00:01:00Z")
                .value_usd(dec!(1000))
                .apr(dec!(0))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let day = &daily[0];

        assert_eq!(day.per_chain["alpha"].annual_revenue, Decimal::ZERO);
        assert_eq!(day.per_chain["alpha"].apr, AprQuote::Rate(dec!(0)));

        // 1000 * 4% * 5%
        assert_eq!(day.per_chain["gamma"].annual_revenue, dec!(2));
        assert_eq!(
            day.per_chain["gamma"].apr,
            AprQuote::DualBand {
                init: Some(dec!(4)),
                lp: None,
            }
        );
    }

    #[test]
    fn test_duplicate_metric_rows_last_wins() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T10:00:00Z")
                .value_usd(dec!(100))
                .build(),
            row("alpha", "total_stake", "2024-01-01T11:00:00Z")
                .value_usd(dec!(200))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        // 200 * 2.2% * 4%, the earlier row is fully shadowed
        assert_eq!(daily[0].per_chain["alpha"].annual_revenue, dec!(0.176));
        assert_eq!(daily[0].per_chain["alpha"].tvl, dec!(200));
    }

    #[test]
    fn test_unconfigured_chain_is_skipped() {
        let configs = test_configs();
        let rows = vec![
            row("osmosis", "total_stake", "2024-01-01T00:00:00Z")
                .value_usd(dec!(999999))
                .apr(dec!(50))
                .build(),
            row("alpha", "total_stake", "2024-01-01T01:00:00Z")
                .value_usd(dec!(1000))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let day = &daily[0];

        assert!(!day.per_chain.contains_key("osmosis"));
        assert_eq!(day.per_chain.len(), configs.len());
        // 1000 * 2.2% * 4%
        assert_eq!(day.total_daily_revenue, dec!(0.88));
    }

    #[test]
    fn test_chain_names_match_case_insensitively() {
        let configs = test_configs();
        let rows = vec![
            row("Alpha", "total_stake", "2024-01-01T00:00:00Z")
                .value_usd(dec!(1000))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        assert_eq!(daily[0].per_chain["alpha"].tvl, dec!(1000));
    }

    #[test]
    fn test_zero_value_usd_is_missing() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T00:00:00Z")
                .value_usd(dec!(0))
                .apr(dec!(10))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let alpha = &daily[0].per_chain["alpha"];

        assert_eq!(alpha.annual_revenue, Decimal::ZERO);
        assert_eq!(alpha.apr, AprQuote::Missing);
    }

    #[test]
    fn test_native_token_accrual_at_latest_price() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T00:00:00Z")
                .value_usd(dec!(1000000))
                .build(),
        ];
        let prices = BTreeMap::from([("ALP".to_string(), dec!(2))]);

        let daily = calculate_daily_revenue(&rows, &configs, &prices);
        let alpha = &daily[0].per_chain["alpha"];

        assert_eq!(alpha.annual_revenue, dec!(880));
        assert_eq!(alpha.daily_native_tokens, (dec!(880) / dec!(365)) / dec!(2));
    }

    #[test]
    fn test_missing_price_skips_accrual() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T00:00:00Z")
                .value_usd(dec!(1000000))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let alpha = &daily[0].per_chain["alpha"];

        assert_eq!(alpha.annual_revenue, dec!(880));
        assert_eq!(alpha.daily_native_tokens, Decimal::ZERO);
    }

    #[test]
    fn test_days_are_ascending() {
        let configs = test_configs();
        let rows = vec![
            row("alpha", "total_stake", "2024-01-01T23:59:59Z")
                .value_usd(dec!(100))
                .build(),
            row("alpha", "total_stake", "2024-01-02T00:00:01Z")
                .value_usd(dec!(200))
                .build(),
            row("alpha", "total_stake", "2024-01-05T12:00:00Z")
                .value_usd(dec!(300))
                .build(),
        ];

        let daily = calculate_daily_revenue(&rows, &configs, &no_prices());
        let dates: Vec<_> = daily.iter().map(|day| day.date).collect();

        assert_eq!(daily.len(), 3);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }
}
