use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Metric types written by the ingestion job into `historical_metrics`.
///
/// `TotalStakeInit` and `TotalStakeLp` only exist for the dual-pool chain,
/// which splits its stake into a native position and an LP-token position.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TotalStake,
    TotalStakeInit,
    TotalStakeLp,
    DelegatorCount,
}

impl MetricKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TotalStake => "total_stake",
            Self::TotalStakeInit => "total_stake_init",
            Self::TotalStakeLp => "total_stake_lp",
            Self::DelegatorCount => "delegator_count",
        }
    }

    /// Stake metrics carry USD values and get the stricter ingest validation.
    pub const fn is_stake(self) -> bool {
        matches!(
            self,
            Self::TotalStake | Self::TotalStakeInit | Self::TotalStakeLp
        )
    }
}
