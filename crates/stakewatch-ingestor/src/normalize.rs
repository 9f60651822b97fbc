use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use stakewatch_db::models::NewHistoricalMetric;
use stakewatch_types::MetricKind;

use crate::sources::{ChainSource, INGEST_SOURCE, INITIA_LP_DENOM, INITIA_NATIVE_DENOM};
use crate::upstream::ChainStatsResponse;

/// Stored chain name: slug with the first letter upper-cased, e.g. "Celestia".
/// Readers compare chain names case-insensitively, so this is cosmetic.
pub fn display_chain_name(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rows for a single-pool chain: one stake row scaled out of the base denom
/// and priced with the external USD quote, plus a delegator count if present.
///
/// A zero APR from upstream means "not reported" here and is stored as null,
/// which lets readers substitute the configured default.
pub fn build_standard_rows(
    source: &ChainSource,
    stats: &ChainStatsResponse,
    price_usd: Option<Decimal>,
    timestamp: DateTime<Utc>,
) -> Vec<NewHistoricalMetric> {
    let chain = display_chain_name(source.slug);
    let mut rows = Vec::with_capacity(2);

    if let Some(raw_stake) = stats.total_stake {
        let value = raw_stake / source.denom_factor;
        let (token_usd, value_usd) = match price_usd {
            Some(price) => (Some(price), Some(value * price)),
            None => (None, None),
        };
        rows.push(NewHistoricalMetric {
            chain: chain.clone(),
            metric_type: MetricKind::TotalStake.as_str().to_string(),
            timestamp,
            value: Some(value),
            value_usd,
            apr: stats.apr.filter(|apr| !apr.is_zero()),
            token_usd,
            source: Some(INGEST_SOURCE.to_string()),
        });
    }

    if let Some(count) = stats.delegator_count {
        rows.push(delegator_row(chain, count, timestamp));
    }

    rows
}

/// Rows for the dual-pool chain: the combined stake row keeps upstream's own
/// USD figures and price, and the two per-denom positions are always emitted,
/// zero-valued when absent, so validation decides what survives. The LP
/// position's USD value is discounted by `lp_weight` before pricing.
///
/// Per-denom APRs are stored as reported, including zero.
pub fn build_dual_pool_rows(
    source: &ChainSource,
    stats: &ChainStatsResponse,
    lp_weight: Decimal,
    timestamp: DateTime<Utc>,
) -> Vec<NewHistoricalMetric> {
    let chain = display_chain_name(source.slug);
    let spot = stats.price_usd.unwrap_or_default();
    let mut rows = Vec::with_capacity(4);

    if let Some(raw_total) = stats.total_stake {
        rows.push(NewHistoricalMetric {
            chain: chain.clone(),
            metric_type: MetricKind::TotalStake.as_str().to_string(),
            timestamp,
            value: Some(raw_total / source.denom_factor),
            value_usd: stats.total_stake_usd,
            apr: stats.apr,
            token_usd: stats.price_usd,
            source: Some(INGEST_SOURCE.to_string()),
        });
    }

    let raw_native = stake_by_denom(stats, INITIA_NATIVE_DENOM);
    let native_value = raw_native / source.denom_factor;
    rows.push(NewHistoricalMetric {
        chain: chain.clone(),
        metric_type: MetricKind::TotalStakeInit.as_str().to_string(),
        timestamp,
        value: Some(native_value),
        value_usd: Some(native_value * spot),
        apr: Some(apr_by_denom(stats, INITIA_NATIVE_DENOM)),
        token_usd: stats.price_usd,
        source: Some(INGEST_SOURCE.to_string()),
    });

    let raw_lp = stake_by_denom(stats, INITIA_LP_DENOM);
    let lp_value = raw_lp / source.denom_factor;
    rows.push(NewHistoricalMetric {
        chain: chain.clone(),
        metric_type: MetricKind::TotalStakeLp.as_str().to_string(),
        timestamp,
        value: Some(lp_value),
        value_usd: Some(lp_value * lp_weight * spot),
        apr: Some(apr_by_denom(stats, INITIA_LP_DENOM)),
        token_usd: stats.price_usd,
        source: Some(INGEST_SOURCE.to_string()),
    });

    if let Some(count) = stats.delegator_count {
        rows.push(delegator_row(chain, count, timestamp));
    }

    rows
}

fn stake_by_denom(stats: &ChainStatsResponse, denom: &str) -> Decimal {
    stats.stake_by_denom.get(denom).copied().unwrap_or_default()
}

fn apr_by_denom(stats: &ChainStatsResponse, denom: &str) -> Decimal {
    stats.apr_by_denom.get(denom).copied().unwrap_or_default()
}

fn delegator_row(chain: String, count: u64, timestamp: DateTime<Utc>) -> NewHistoricalMetric {
    NewHistoricalMetric {
        chain,
        metric_type: MetricKind::DelegatorCount.as_str().to_string(),
        timestamp,
        value: Some(Decimal::from(count)),
        value_usd: None,
        apr: None,
        token_usd: None,
        source: Some(INGEST_SOURCE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::sources::CHAIN_SOURCES;

    fn source(slug: &str) -> &'static ChainSource {
        CHAIN_SOURCES
            .iter()
            .find(|source| source.slug == slug)
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-03-07T06:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_display_chain_name_capitalizes_first_letter() {
        assert_eq!(display_chain_name("celestia"), "Celestia");
        assert_eq!(display_chain_name("sthype"), "Sthype");
        assert_eq!(display_chain_name(""), "");
    }

    #[test]
    fn test_standard_rows_scale_and_price_the_stake() {
        let stats = ChainStatsResponse {
            total_stake: Some(dec!(5_000_000_000_000)),
            apr: Some(dec!(11)),
            delegator_count: Some(1_234),
            ..Default::default()
        };
        let rows = build_standard_rows(source("celestia"), &stats, Some(dec!(4.5)), now());

        assert_eq!(rows.len(), 2);
        let stake = &rows[0];
        assert_eq!(stake.chain, "Celestia");
        assert_eq!(stake.metric_type, "total_stake");
        assert_eq!(stake.value, Some(dec!(5_000_000)));
        assert_eq!(stake.value_usd, Some(dec!(22_500_000)));
        assert_eq!(stake.token_usd, Some(dec!(4.5)));
        assert_eq!(stake.apr, Some(dec!(11)));
        assert_eq!(stake.source.as_deref(), Some("cron"));

        let delegators = &rows[1];
        assert_eq!(delegators.metric_type, "delegator_count");
        assert_eq!(delegators.value, Some(dec!(1_234)));
        assert_eq!(delegators.value_usd, None);
        assert_eq!(delegators.apr, None);
    }

    #[test]
    fn test_standard_zero_apr_becomes_null() {
        let stats = ChainStatsResponse {
            total_stake: Some(dec!(100)),
            apr: Some(Decimal::ZERO),
            ..Default::default()
        };
        let rows = build_standard_rows(source("hyperliquid"), &stats, Some(dec!(30)), now());
        assert_eq!(rows[0].apr, None);
    }

    #[test]
    fn test_standard_without_price_leaves_usd_fields_null() {
        let stats = ChainStatsResponse {
            total_stake: Some(dec!(200_000_000)),
            apr: Some(dec!(9)),
            ..Default::default()
        };
        let rows = build_standard_rows(source("hyperliquid"), &stats, None, now());
        assert_eq!(rows[0].value, Some(dec!(2)));
        assert_eq!(rows[0].value_usd, None);
        assert_eq!(rows[0].token_usd, None);
    }

    #[test]
    fn test_standard_delegators_only_when_stake_missing() {
        let stats = ChainStatsResponse {
            delegator_count: Some(77),
            ..Default::default()
        };
        let rows = build_standard_rows(source("somnia"), &stats, None, now());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].metric_type, "delegator_count");
    }

    #[test]
    fn test_dual_pool_rows_split_and_weight_the_positions() {
        let stats = ChainStatsResponse {
            total_stake: Some(dec!(54_321_000_000)),
            total_stake_usd: Some(dec!(33_000)),
            price_usd: Some(dec!(0.5)),
            apr: Some(dec!(5)),
            delegator_count: Some(900),
            stake_by_denom: [
                (INITIA_NATIVE_DENOM.to_string(), dec!(40_000_000_000)),
                (INITIA_LP_DENOM.to_string(), dec!(14_321_000_000)),
            ]
            .into(),
            apr_by_denom: [
                (INITIA_NATIVE_DENOM.to_string(), dec!(4.1)),
                (INITIA_LP_DENOM.to_string(), Decimal::ZERO),
            ]
            .into(),
            ..Default::default()
        };
        let rows = build_dual_pool_rows(source("initia"), &stats, dec!(0.8), now());
        assert_eq!(rows.len(), 4);

        let total = &rows[0];
        assert_eq!(total.chain, "Initia");
        assert_eq!(total.metric_type, "total_stake");
        assert_eq!(total.value, Some(dec!(54_321)));
        assert_eq!(total.value_usd, Some(dec!(33_000)));
        assert_eq!(total.token_usd, Some(dec!(0.5)));
        assert_eq!(total.apr, Some(dec!(5)));

        let native = &rows[1];
        assert_eq!(native.metric_type, "total_stake_init");
        assert_eq!(native.value, Some(dec!(40_000)));
        assert_eq!(native.value_usd, Some(dec!(20_000)));
        assert_eq!(native.apr, Some(dec!(4.1)));

        let lp = &rows[2];
        assert_eq!(lp.metric_type, "total_stake_lp");
        assert_eq!(lp.value, Some(dec!(14_321)));
        assert_eq!(lp.value_usd, Some(dec!(14_321) * dec!(0.8) * dec!(0.5)));
        assert_eq!(lp.apr, Some(Decimal::ZERO));

        assert_eq!(rows[3].metric_type, "delegator_count");
    }

    #[test]
    fn test_dual_pool_missing_denoms_emit_zero_rows() {
        let stats = ChainStatsResponse {
            total_stake: Some(dec!(1_000_000)),
            price_usd: Some(dec!(0.5)),
            ..Default::default()
        };
        let rows = build_dual_pool_rows(source("initia"), &stats, dec!(0.8), now());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].value, Some(Decimal::ZERO));
        assert_eq!(rows[1].value_usd, Some(Decimal::ZERO));
        assert_eq!(rows[1].apr, Some(Decimal::ZERO));
        assert_eq!(rows[2].value, Some(Decimal::ZERO));
    }

    #[test]
    fn test_dual_pool_keeps_zero_combined_apr() {
        // Unlike standard chains, the combined dual-pool row stores APR as
        // reported, zero included.
        let stats = ChainStatsResponse {
            total_stake: Some(dec!(2_000_000)),
            apr: Some(Decimal::ZERO),
            ..Default::default()
        };
        let rows = build_dual_pool_rows(source("initia"), &stats, dec!(0.8), now());
        assert_eq!(rows[0].apr, Some(Decimal::ZERO));
    }
}
