use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stakewatch_types::MetricKind;

use crate::schema::historical_metrics;

/// One raw metric observation written by the ingestion job.
///
/// Rows are immutable once written. Uniqueness over
/// (chain, metric_type, timestamp) is NOT enforced; consumers aggregating by
/// day must keep the last row seen per metric type.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = historical_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoricalMetric {
    pub id: i64,
    pub chain: String,
    pub metric_type: String,
    pub timestamp: DateTime<Utc>,
    pub value: Option<Decimal>,
    pub value_usd: Option<Decimal>,
    pub apr: Option<Decimal>,
    pub token_usd: Option<Decimal>,
    pub source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = historical_metrics)]
pub struct NewHistoricalMetric {
    pub chain: String,
    pub metric_type: String,
    pub timestamp: DateTime<Utc>,
    pub value: Option<Decimal>,
    pub value_usd: Option<Decimal>,
    pub apr: Option<Decimal>,
    pub token_usd: Option<Decimal>,
    pub source: Option<String>,
}

impl HistoricalMetric {
    /// Fetch one page of the full metric history, ascending by timestamp.
    ///
    /// The id tiebreak keeps page boundaries stable when several rows share
    /// a timestamp.
    pub fn find_page(
        limit: i64,
        offset: i64,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        historical_metrics::table
            .order(historical_metrics::timestamp.asc())
            .then_order_by(historical_metrics::id.asc())
            .limit(limit)
            .offset(offset)
            .load(conn)
    }

    /// Find the latest row for a chain and metric type.
    ///
    /// Chain names are matched case-insensitively: the writer stores
    /// "Celestia" while readers look up "celestia". Callers pass only
    /// configured chain names, never raw user input.
    pub fn find_latest(
        chain: &str,
        kind: MetricKind,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        historical_metrics::table
            .filter(historical_metrics::chain.ilike(chain))
            .filter(historical_metrics::metric_type.eq(kind.as_str()))
            .order(historical_metrics::timestamp.desc())
            .first(conn)
    }

    /// Full ascending history for a chain and metric type, matching the
    /// chain name case-insensitively.
    pub fn find_series(
        chain: &str,
        kind: MetricKind,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        historical_metrics::table
            .filter(historical_metrics::chain.ilike(chain))
            .filter(historical_metrics::metric_type.eq(kind.as_str()))
            .order(historical_metrics::timestamp.asc())
            .load(conn)
    }

    /// Insert a batch of rows from one ingestion run
    pub fn insert_batch(
        rows: &[NewHistoricalMetric],
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<usize> {
        diesel::insert_into(historical_metrics::table)
            .values(rows)
            .execute(conn)
    }
}
