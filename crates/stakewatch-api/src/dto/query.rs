use serde::Deserialize;
use utoipa::ToSchema;

/// Common query parameters for endpoints that accept a time window
#[derive(Debug, Deserialize, ToSchema)]
pub struct WindowQuery {
    #[serde(default = "defaults::window")]
    pub window: String,
}

/// Query parameters for the per-chain series endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChainSeriesQuery {
    #[serde(default = "defaults::metric")]
    pub metric: String,
    #[serde(default = "defaults::window")]
    pub window: String,
}

pub mod defaults {
    pub fn window() -> String {
        "max".to_string()
    }

    pub fn metric() -> String {
        "total_stake".to_string()
    }
}
