use std::time::Duration;

pub const DEFAULT_UPSTREAM_API_URL: &str = "https://api.validao.xyz/api/v1";
pub const DEFAULT_PRICE_API_URL: &str = "https://pro-api.coingecko.com/api/v3";
const DEFAULT_RUN_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Debug, Clone)]
pub struct IngestorConfig {
    /// Base URL of the validator API serving overview and per-chain stats.
    pub upstream_api_url: String,
    /// Base URL of the spot price API.
    pub price_api_url: String,
    /// Price API key. Without one, price lookups are skipped and stake rows
    /// are written without USD values.
    pub price_api_key: Option<String>,
    /// Time between ingestion runs.
    pub run_interval: Duration,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            upstream_api_url: DEFAULT_UPSTREAM_API_URL.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            price_api_key: None,
            run_interval: DEFAULT_RUN_INTERVAL,
        }
    }
}
