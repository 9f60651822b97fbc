use clap::Parser;
use stakewatch_ingestor::config::{DEFAULT_PRICE_API_URL, DEFAULT_UPSTREAM_API_URL};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct StakewatchCli {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Base URL of the validator API serving live chain stats
    #[arg(long, env = "UPSTREAM_API_URL", default_value = DEFAULT_UPSTREAM_API_URL)]
    pub upstream_api_url: String,

    /// Base URL of the spot price API
    #[arg(long, env = "PRICE_API_URL", default_value = DEFAULT_PRICE_API_URL)]
    pub price_api_url: String,

    /// Spot price API key; without it stake rows carry no USD values
    #[arg(long, env = "PRICE_API_KEY")]
    pub price_api_key: Option<String>,

    /// Seconds between ingestion runs
    #[arg(long, env = "INGEST_INTERVAL_SECS", default_value = "21600")]
    pub ingest_interval_secs: u64,
}
