use rust_decimal::Decimal;
use serde::Serialize;
use stakewatch_db::models::ProtocolSnapshot;
use utoipa::ToSchema;

/// One protocol-wide snapshot as written by the ingestion job
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProtocolSnapshotDto {
    /// RFC3339 timestamp
    pub timestamp: String,
    pub total_stake_usd: Decimal,
    pub active_chains: i32,
    pub total_chains: i32,
    pub total_delegators: i64,
    pub incentivized_chains: Option<i32>,
    pub incentivized_stake: Option<Decimal>,
}

impl From<ProtocolSnapshot> for ProtocolSnapshotDto {
    fn from(snapshot: ProtocolSnapshot) -> Self {
        Self {
            timestamp: snapshot.timestamp.to_rfc3339(),
            total_stake_usd: snapshot.total_stake_usd,
            active_chains: snapshot.active_chains,
            total_chains: snapshot.total_chains,
            total_delegators: snapshot.total_delegators,
            incentivized_chains: snapshot.incentivized_chains,
            incentivized_stake: snapshot.incentivized_stake,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverviewSeriesResponse {
    pub window: String,
    pub points: Vec<ProtocolSnapshotDto>,
}
