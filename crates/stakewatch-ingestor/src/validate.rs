use rust_decimal::{Decimal, dec};
use stakewatch_db::models::NewHistoricalMetric;
use stakewatch_types::MetricKind;

/// Raw amounts above this are treated as denom-scaling bugs, not real stake.
const MAX_PLAUSIBLE_STAKE: Decimal = dec!(1_000_000_000_000_000);

/// Drop rows that would poison the history. Returns the surviving rows and
/// the number rejected.
pub fn filter_valid_rows(rows: Vec<NewHistoricalMetric>) -> (Vec<NewHistoricalMetric>, usize) {
    let total = rows.len();
    let accepted: Vec<NewHistoricalMetric> = rows.into_iter().filter(is_acceptable).collect();
    let rejected = total - accepted.len();
    (accepted, rejected)
}

/// Stake rows must carry at least one non-zero value field and a plausible
/// token amount. Anything that is not a stake metric passes through.
fn is_acceptable(row: &NewHistoricalMetric) -> bool {
    let is_stake = row
        .metric_type
        .parse::<MetricKind>()
        .is_ok_and(MetricKind::is_stake);
    if !is_stake {
        return true;
    }

    let has_value = row.value.is_some_and(|value| !value.is_zero());
    let has_value_usd = row.value_usd.is_some_and(|value| !value.is_zero());
    if !has_value && !has_value_usd {
        tracing::warn!(
            "[Ingestor] 🚮 Rejecting {}/{}: no usable value",
            row.chain,
            row.metric_type
        );
        return false;
    }

    if row.value.is_some_and(|value| value > MAX_PLAUSIBLE_STAKE) {
        tracing::warn!(
            "[Ingestor] 🚮 Rejecting {}/{}: value {} exceeds plausibility cap",
            row.chain,
            row.metric_type,
            row.value.unwrap_or_default()
        );
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(
        metric_type: &str,
        value: Option<Decimal>,
        value_usd: Option<Decimal>,
    ) -> NewHistoricalMetric {
        NewHistoricalMetric {
            chain: "Celestia".to_string(),
            metric_type: metric_type.to_string(),
            timestamp: Utc::now(),
            value,
            value_usd,
            apr: None,
            token_usd: None,
            source: Some("cron".to_string()),
        }
    }

    #[test]
    fn test_stake_rows_need_a_nonzero_value_field() {
        let rows = vec![
            row("total_stake", None, None),
            row("total_stake", Some(Decimal::ZERO), Some(Decimal::ZERO)),
            row("total_stake_init", Some(Decimal::ZERO), None),
            row("total_stake", Some(dec!(5)), None),
            row("total_stake_lp", None, Some(dec!(120.5))),
        ];
        let (accepted, rejected) = filter_valid_rows(rows);
        assert_eq!(accepted.len(), 2);
        assert_eq!(rejected, 3);
        assert!(accepted.iter().all(|row| {
            row.value.unwrap_or_default() > Decimal::ZERO
                || row.value_usd.unwrap_or_default() > Decimal::ZERO
        }));
    }

    #[test]
    fn test_implausibly_large_stake_is_rejected() {
        let huge = MAX_PLAUSIBLE_STAKE + dec!(1);
        let (accepted, rejected) = filter_valid_rows(vec![
            row("total_stake", Some(huge), Some(dec!(1))),
            row("total_stake", Some(MAX_PLAUSIBLE_STAKE), None),
        ]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected, 1);
        assert_eq!(accepted[0].value, Some(MAX_PLAUSIBLE_STAKE));
    }

    #[test]
    fn test_delegator_counts_always_pass() {
        let (accepted, rejected) = filter_valid_rows(vec![
            row("delegator_count", Some(Decimal::ZERO), None),
            row("delegator_count", None, None),
        ]);
        assert_eq!(accepted.len(), 2);
        assert_eq!(rejected, 0);
    }

    #[test]
    fn test_unknown_metric_types_pass_through() {
        let (accepted, rejected) = filter_valid_rows(vec![row("block_height", None, None)]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected, 0);
    }
}
