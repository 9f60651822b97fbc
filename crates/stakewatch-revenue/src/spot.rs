use std::collections::BTreeMap;

use rust_decimal::Decimal;
use stakewatch_db::models::HistoricalMetric;
use stakewatch_types::ChainConfig;

/// Resolve the latest known spot price per token symbol from a frozen,
/// ascending-by-timestamp row set.
///
/// Later rows overwrite earlier ones, so each symbol ends up with the most
/// recent positive `token_usd` seen. Zero and negative prices are ignored;
/// a token with no usable price is simply absent from the map and its
/// native-token accrual is skipped downstream.
pub fn latest_spot_prices(
    rows: &[HistoricalMetric],
    configs: &[ChainConfig],
) -> BTreeMap<String, Decimal> {
    let mut prices = BTreeMap::new();

    for row in rows {
        let Some(config) = configs
            .iter()
            .find(|config| config.name.eq_ignore_ascii_case(&row.chain))
        else {
            continue;
        };
        if let Some(price) = row.token_usd.filter(|price| *price > Decimal::ZERO) {
            prices.insert(config.token_symbol.to_string(), price);
        }
    }

    prices
}
