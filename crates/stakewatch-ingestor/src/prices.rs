use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use stakewatch_metrics::IngestMetrics;

use crate::fetch::get_json_with_retry;

const PRICE_TIMEOUT: Duration = Duration::from_secs(20);
const PRICE_ATTEMPTS: u32 = 3;
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// Spot price lookups against a CoinGecko-compatible `/simple/price` API.
#[derive(Debug, Clone)]
pub struct PriceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PriceClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// USD spot price for `id`, or `None` if it cannot be resolved.
    ///
    /// Successful lookups land in `cache` so chains sharing a price id cost
    /// one request per run. A missing price never fails the run; callers
    /// degrade to rows without USD values.
    pub async fn fetch_usd_price(
        &self,
        id: &str,
        cache: &mut HashMap<String, Decimal>,
        metrics: &IngestMetrics,
    ) -> Option<Decimal> {
        if let Some(price) = cache.get(id) {
            return Some(*price);
        }
        let Some(api_key) = &self.api_key else {
            tracing::warn!("[Ingestor] 🔑 No price API key configured, skipping price for {id}");
            return None;
        };
        let url = format!(
            "{}/simple/price?ids={id}&vs_currencies=usd",
            self.base_url.trim_end_matches('/')
        );
        let result: Result<HashMap<String, HashMap<String, Decimal>>, _> = get_json_with_retry(
            || {
                self.client
                    .get(&url)
                    .timeout(PRICE_TIMEOUT)
                    .header(API_KEY_HEADER, api_key)
            },
            "price",
            PRICE_ATTEMPTS,
            metrics,
        )
        .await;
        match result {
            Ok(payload) => {
                let price = payload.get(id).and_then(|quotes| quotes.get("usd")).copied();
                match price {
                    Some(price) => {
                        cache.insert(id.to_string(), price);
                        Some(price)
                    }
                    None => {
                        tracing::warn!("[Ingestor] 🫥 Price response had no USD quote for {id}");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::error!("[Ingestor] 🔴 Price fetch failed for {id}: {e}");
                None
            }
        }
    }
}
