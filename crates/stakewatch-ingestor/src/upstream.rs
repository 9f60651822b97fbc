use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use stakewatch_metrics::IngestMetrics;

use crate::error::IngestError;
use crate::fetch::get_json_with_retry;

const OVERVIEW_TIMEOUT: Duration = Duration::from_secs(45);
const OVERVIEW_ATTEMPTS: u32 = 3;
const CHAIN_TIMEOUT: Duration = Duration::from_secs(30);
const CHAIN_ATTEMPTS: u32 = 2;

/// Protocol-wide aggregates, one snapshot per ingestion run.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewResponse {
    pub total_stake_usd: Decimal,
    pub active_chains: i32,
    pub total_chains: i32,
    pub total_delegators: i64,
    #[serde(default)]
    pub incentivized_chains: Option<i32>,
    #[serde(default)]
    pub incentivized_stake: Option<Decimal>,
}

/// Live per-chain stats. Everything is optional: upstream omits fields it
/// cannot compute, and raw amounts arrive in the chain's base denom.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainStatsResponse {
    #[serde(default)]
    pub total_stake: Option<Decimal>,
    #[serde(default)]
    pub total_stake_usd: Option<Decimal>,
    #[serde(default)]
    pub price_usd: Option<Decimal>,
    #[serde(default)]
    pub apr: Option<Decimal>,
    #[serde(default)]
    pub delegator_count: Option<u64>,
    #[serde(default)]
    pub stake_by_denom: HashMap<String, Decimal>,
    #[serde(default)]
    pub apr_by_denom: HashMap<String, Decimal>,
}

/// Client for the validator's public API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The run fails if this still errors after its retries: without the
    /// overview there is nothing to snapshot.
    pub async fn fetch_overview(
        &self,
        metrics: &IngestMetrics,
    ) -> Result<OverviewResponse, IngestError> {
        let url = format!("{}/overview/overview", self.base_url.trim_end_matches('/'));
        get_json_with_retry(
            || self.client.get(&url).timeout(OVERVIEW_TIMEOUT),
            "overview",
            OVERVIEW_ATTEMPTS,
            metrics,
        )
        .await
    }

    pub async fn fetch_chain_stats(
        &self,
        slug: &str,
        metrics: &IngestMetrics,
    ) -> Result<ChainStatsResponse, IngestError> {
        let url = format!(
            "{}/overview/chain/{slug}",
            self.base_url.trim_end_matches('/')
        );
        get_json_with_retry(
            || self.client.get(&url).timeout(CHAIN_TIMEOUT),
            slug,
            CHAIN_ATTEMPTS,
            metrics,
        )
        .await
    }
}
