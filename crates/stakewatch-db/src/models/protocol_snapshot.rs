use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::protocol_snapshots;

/// Whole-protocol overview written once per ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = protocol_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProtocolSnapshot {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub total_stake_usd: Decimal,
    pub active_chains: i32,
    pub total_chains: i32,
    pub total_delegators: i64,
    pub incentivized_chains: Option<i32>,
    pub incentivized_stake: Option<Decimal>,
    pub source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = protocol_snapshots)]
pub struct NewProtocolSnapshot {
    pub timestamp: DateTime<Utc>,
    pub total_stake_usd: Decimal,
    pub active_chains: i32,
    pub total_chains: i32,
    pub total_delegators: i64,
    pub incentivized_chains: Option<i32>,
    pub incentivized_stake: Option<Decimal>,
    pub source: Option<String>,
}

impl ProtocolSnapshot {
    /// Find the single latest snapshot
    pub fn find_latest(conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        protocol_snapshots::table
            .order(protocol_snapshots::timestamp.desc())
            .first(conn)
    }

    /// Full ascending snapshot history
    pub fn find_series(conn: &mut diesel::PgConnection) -> QueryResult<Vec<Self>> {
        protocol_snapshots::table
            .order(protocol_snapshots::timestamp.asc())
            .load(conn)
    }

    /// Create a new snapshot
    pub fn create(
        new_snapshot: &NewProtocolSnapshot,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        diesel::insert_into(protocol_snapshots::table)
            .values(new_snapshot)
            .get_result(conn)
    }
}
