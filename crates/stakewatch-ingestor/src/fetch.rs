use std::time::Duration;

use serde::de::DeserializeOwned;
use stakewatch_metrics::IngestMetrics;

use crate::error::IngestError;

pub(crate) const USER_AGENT: &str = "stakewatch/1.0 (https://validao.xyz)";

const RETRY_BASE_MS: u64 = 2_000;
const RETRY_CAP_MS: u64 = 20_000;

/// Delay before the next attempt, after `failed_attempts` have failed.
/// Doubles from a 2s base and caps at 20s.
pub(crate) fn backoff_delay(failed_attempts: u32) -> Duration {
    let doublings = failed_attempts.saturating_sub(1).min(16);
    Duration::from_millis((RETRY_BASE_MS << doublings).min(RETRY_CAP_MS))
}

/// GET a JSON payload, retrying transient failures with exponential backoff.
///
/// `build_request` is invoked once per attempt so each retry gets a fresh
/// request. Non-2xx statuses and body decode failures count as failed
/// attempts too.
pub(crate) async fn get_json_with_retry<T, F>(
    build_request: F,
    endpoint: &str,
    max_attempts: u32,
    metrics: &IngestMetrics,
) -> Result<T, IngestError>
where
    T: DeserializeOwned,
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error = String::new();
    for attempt in 1..=max_attempts {
        match fetch_json_once(build_request()).await {
            Ok(payload) => return Ok(payload),
            Err(e) => {
                tracing::warn!(
                    "[Ingestor] 🔁 Attempt {attempt}/{max_attempts} failed for {endpoint}: {e}"
                );
                last_error = e;
            }
        }
        if attempt < max_attempts {
            metrics.record_upstream_retry(endpoint);
            tokio::time::sleep(backoff_delay(attempt)).await;
        }
    }
    Err(IngestError::RetriesExhausted {
        endpoint: endpoint.to_string(),
        attempts: max_attempts,
        last_error,
    })
}

async fn fetch_json_once<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, String> {
    let response = request
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("status {status}: {body}"));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_from_two_seconds() {
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(3), Duration::from_secs(8));
        assert_eq!(backoff_delay(4), Duration::from_secs(16));
    }

    #[test]
    fn test_backoff_caps_at_twenty_seconds() {
        assert_eq!(backoff_delay(5), Duration::from_secs(20));
        assert_eq!(backoff_delay(12), Duration::from_secs(20));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_secs(20));
    }
}
