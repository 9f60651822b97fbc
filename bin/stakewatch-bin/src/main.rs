mod cli;

use std::time::Duration;

use crate::cli::StakewatchCli;
use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{services::ServiceGroup, telemetry::init_telemetry};

use pragma_common::services::Service;
use stakewatch_api::{ApiService, AppState};
use stakewatch_db::{init_pool, run_migrations};
use stakewatch_ingestor::{IngestTask, IngestorConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let StakewatchCli {
        database_url,
        otel_collector_endpoint,
        api_port,
        upstream_api_url,
        price_api_url,
        price_api_key,
        ingest_interval_secs,
    } = StakewatchCli::parse();

    let app_name = "stakewatch_api";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let pool = init_pool(app_name, &database_url)?;
    run_migrations(&pool).await?;

    let app_state = AppState { pool: pool.clone() };

    let api_service = ApiService::new(app_state, "0.0.0.0", api_port);

    let ingest_config = IngestorConfig {
        upstream_api_url,
        price_api_url,
        price_api_key,
        run_interval: Duration::from_secs(ingest_interval_secs),
    };
    let ingest_service = IngestTask::new(pool.clone(), ingest_config);

    ServiceGroup::default()
        .with(api_service)
        .with(ingest_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
