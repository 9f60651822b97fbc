pub mod config;
pub mod error;
mod fetch;
pub mod normalize;
pub mod prices;
pub mod sources;
pub mod task;
pub mod upstream;
pub mod validate;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use deadpool_diesel::postgres::Pool;
use rust_decimal::Decimal;
use stakewatch_db::StakewatchPool;
use stakewatch_db::models::{
    HistoricalMetric, NewHistoricalMetric, NewProtocolSnapshot, ProtocolSnapshot,
};
use stakewatch_metrics::{MetricsRegistry, RunOutcome};
use stakewatch_types::{PoolLayout, chain_config};

pub use crate::config::IngestorConfig;
pub use crate::error::IngestError;
pub use crate::task::IngestTask;

use crate::normalize::{build_dual_pool_rows, build_standard_rows};
use crate::prices::PriceClient;
use crate::sources::{CHAIN_SOURCES, ChainSource, INGEST_SOURCE};
use crate::upstream::{ChainStatsResponse, UpstreamClient};
use crate::validate::filter_valid_rows;

/// Periodically pulls live staking stats and spot prices, normalizes them
/// into metric rows, and writes them plus a protocol snapshot to Postgres.
pub struct IngestorService {
    db_pool: Pool,
    config: IngestorConfig,
    upstream: UpstreamClient,
    prices: PriceClient,
    metrics: Arc<MetricsRegistry>,
}

impl IngestorService {
    pub fn new(db_pool: Pool, config: IngestorConfig) -> Self {
        let upstream = UpstreamClient::new(config.upstream_api_url.clone());
        let prices = PriceClient::new(config.price_api_url.clone(), config.price_api_key.clone());
        Self {
            db_pool,
            config,
            upstream,
            prices,
            metrics: MetricsRegistry::new(),
        }
    }

    pub async fn run_forever(&self) -> anyhow::Result<()> {
        tracing::info!(
            "[Ingestor] 🚚 Ingestion loop started, running every {}s",
            self.config.run_interval.as_secs()
        );
        loop {
            if let Err(e) = self.run_once().await {
                self.metrics.ingest.record_run(RunOutcome::Failed);
                tracing::error!("[Ingestor] 🔴 Ingestion run failed: {e}");
            }
            tokio::time::sleep(self.config.run_interval).await;
        }
    }

    /// One full ingestion pass.
    ///
    /// The overview fetch is load-bearing and fails the run; individual
    /// chains that still fail after retries are skipped. A run where
    /// validation leaves nothing to write is a successful no-op and writes
    /// no snapshot either.
    pub async fn run_once(&self) -> Result<(), IngestError> {
        let started = Instant::now();
        let run_timestamp = Utc::now();
        tracing::info!("[Ingestor] 🚚 Starting ingestion run");

        let overview = self.upstream.fetch_overview(&self.metrics.ingest).await?;

        let fetches = CHAIN_SOURCES.iter().map(|source| async move {
            match self
                .upstream
                .fetch_chain_stats(source.slug, &self.metrics.ingest)
                .await
            {
                Ok(stats) => Some((source, stats)),
                Err(e) => {
                    tracing::error!("[Ingestor] 🔴 Skipping chain {}: {e}", source.slug);
                    None
                }
            }
        });
        let fetched: Vec<(&ChainSource, ChainStatsResponse)> = futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect();

        let mut price_cache: HashMap<String, Decimal> = HashMap::new();
        let mut accepted: Vec<NewHistoricalMetric> = Vec::new();
        let mut rows_rejected = 0;

        for (source, stats) in &fetched {
            let rows = match chain_config(source.slug).map(|config| config.pools) {
                Some(PoolLayout::DualPool { lp_weight }) => {
                    build_dual_pool_rows(source, stats, lp_weight, run_timestamp)
                }
                _ => {
                    let price_usd = self
                        .prices
                        .fetch_usd_price(source.price_id, &mut price_cache, &self.metrics.ingest)
                        .await;
                    build_standard_rows(source, stats, price_usd, run_timestamp)
                }
            };
            let (valid, rejected) = filter_valid_rows(rows);
            if !valid.is_empty() {
                self.metrics
                    .ingest
                    .record_rows_written(source.slug, valid.len() as u64);
            }
            if rejected > 0 {
                self.metrics
                    .ingest
                    .record_rows_rejected(source.slug, rejected as u64);
                rows_rejected += rejected;
            }
            accepted.extend(valid);
        }

        if accepted.is_empty() {
            tracing::warn!("[Ingestor] ⏭️ No valid metrics collected, skipping insert");
            self.metrics.ingest.record_run(RunOutcome::NoOp);
            return Ok(());
        }

        let snapshot = NewProtocolSnapshot {
            timestamp: run_timestamp,
            total_stake_usd: overview.total_stake_usd,
            active_chains: overview.active_chains,
            total_chains: overview.total_chains,
            total_delegators: overview.total_delegators,
            incentivized_chains: overview.incentivized_chains,
            incentivized_stake: overview.incentivized_stake,
            source: Some(INGEST_SOURCE.to_string()),
        };

        let rows_written = accepted.len();
        let chains_fetched = fetched.len();
        let rows_insert = self.db_pool.interact_with_context(
            "insert historical metrics batch".to_string(),
            move |conn| HistoricalMetric::insert_batch(&accepted, conn),
        );
        let snapshot_insert = self.db_pool.interact_with_context(
            "insert protocol snapshot".to_string(),
            move |conn| ProtocolSnapshot::create(&snapshot, conn),
        );
        tokio::try_join!(rows_insert, snapshot_insert)?;

        self.metrics.ingest.record_run(RunOutcome::Completed);
        tracing::info!(
            "[Ingestor] ✅ Run completed in {:?}: {rows_written} rows written, {rows_rejected} rejected, {chains_fetched}/{} chains",
            started.elapsed(),
            CHAIN_SOURCES.len()
        );
        Ok(())
    }
}
