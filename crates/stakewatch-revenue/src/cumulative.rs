use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use stakewatch_types::ChainConfig;

use crate::daily::DailyRevenue;

/// Running USD value of everything earned up to and including `date`.
#[derive(Debug, Clone)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative_revenue: Decimal,
}

/// Fold the daily series into a cumulative revenue series.
///
/// Each day adds `daily_native_tokens x latest spot price` per chain to a
/// carried accumulator, in ascending day order. The latest price values the
/// entire history, so the series answers "what would everything earned so far
/// be worth today". Chains without a known price contribute nothing.
pub fn calculate_cumulative_revenue(
    daily: &[DailyRevenue],
    configs: &[ChainConfig],
    spot_prices: &BTreeMap<String, Decimal>,
) -> Vec<CumulativePoint> {
    let mut running_total = Decimal::ZERO;

    daily
        .iter()
        .map(|day| {
            for (chain, entry) in &day.per_chain {
                if entry.daily_native_tokens.is_zero() {
                    continue;
                }
                let Some(config) = configs
                    .iter()
                    .find(|config| config.name == chain.as_str())
                else {
                    continue;
                };
                if let Some(price) = spot_prices.get(config.token_symbol) {
                    running_total += entry.daily_native_tokens * price;
                }
            }

            CumulativePoint {
                date: day.date,
                cumulative_revenue: running_total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apr::AprQuote;
    use crate::daily::ChainDayRevenue;
    use crate::testutil::test_configs;
    use rust_decimal::dec;

    fn day(date: &str, tokens_per_chain: &[(&str, Decimal)]) -> DailyRevenue {
        let per_chain = tokens_per_chain
            .iter()
            .map(|(chain, tokens)| {
                (
                    (*chain).to_string(),
                    ChainDayRevenue {
                        annual_revenue: Decimal::ZERO,
                        tvl: Decimal::ZERO,
                        apr: AprQuote::Missing,
                        daily_native_tokens: *tokens,
                    },
                )
            })
            .collect();

        DailyRevenue {
            date: date.parse().unwrap(),
            total_daily_revenue: Decimal::ZERO,
            per_chain,
        }
    }

    #[test]
    fn test_running_fold_accumulates_in_order() {
        let configs = test_configs();
        let prices = BTreeMap::from([("ALP".to_string(), dec!(2)), ("BET".to_string(), dec!(10))]);
        let daily = vec![
            day("2024-01-01", &[("alpha", dec!(3)), ("beta", dec!(1))]),
            day("2024-01-02", &[("alpha", dec!(1))]),
        ];

        let cumulative = calculate_cumulative_revenue(&daily, &configs, &prices);

        assert_eq!(cumulative.len(), 2);
        // 3*2 + 1*10, then + 1*2
        assert_eq!(cumulative[0].cumulative_revenue, dec!(16));
        assert_eq!(cumulative[1].cumulative_revenue, dec!(18));
    }

    #[test]
    fn test_quiet_day_carries_accumulator() {
        let configs = test_configs();
        let prices = BTreeMap::from([("ALP".to_string(), dec!(5))]);
        let daily = vec![
            day("2024-01-01", &[("alpha", dec!(2))]),
            day("2024-01-02", &[("alpha", Decimal::ZERO)]),
            day("2024-01-03", &[("alpha", dec!(1))]),
        ];

        let cumulative = calculate_cumulative_revenue(&daily, &configs, &prices);

        assert_eq!(cumulative[0].cumulative_revenue, dec!(10));
        assert_eq!(cumulative[1].cumulative_revenue, dec!(10));
        assert_eq!(cumulative[2].cumulative_revenue, dec!(15));
    }

    #[test]
    fn test_series_is_non_decreasing() {
        let configs = test_configs();
        let prices = BTreeMap::from([("ALP".to_string(), dec!(1.5)), ("GAM".to_string(), dec!(7))]);
        let daily = vec![
            day("2024-01-01", &[("alpha", dec!(0.5)), ("gamma", dec!(2))]),
            day("2024-01-02", &[("alpha", Decimal::ZERO)]),
            day("2024-01-03", &[("gamma", dec!(0.25))]),
            day("2024-01-04", &[("alpha", dec!(4))]),
        ];

        let cumulative = calculate_cumulative_revenue(&daily, &configs, &prices);

        assert!(
            cumulative
                .windows(2)
                .all(|w| w[0].cumulative_revenue <= w[1].cumulative_revenue)
        );
    }

    #[test]
    fn test_missing_price_contributes_nothing() {
        let configs = test_configs();
        // No BET price known.
        let prices = BTreeMap::from([("ALP".to_string(), dec!(2))]);
        let daily = vec![day("2024-01-01", &[("alpha", dec!(1)), ("beta", dec!(100))])];

        let cumulative = calculate_cumulative_revenue(&daily, &configs, &prices);
        assert_eq!(cumulative[0].cumulative_revenue, dec!(2));
    }
}
