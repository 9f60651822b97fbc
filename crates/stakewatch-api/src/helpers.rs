use deadpool_diesel::postgres::Pool;
use stakewatch_revenue::{RevenueReport, calculate_revenue_report};
use stakewatch_types::{CHAIN_CONFIGS, Window};

use crate::errors::ApiError;

/// Load the full metric history and run the revenue derivation over it.
///
/// Every call re-derives from a fresh paginated read; nothing is cached
/// between requests.
pub async fn load_revenue_report(pool: &Pool) -> Result<RevenueReport, ApiError> {
    let rows = stakewatch_db::load_all_metrics(pool).await?;
    Ok(calculate_revenue_report(&rows, &CHAIN_CONFIGS))
}

pub fn parse_window(raw: &str) -> Result<Window, ApiError> {
    match raw {
        "1w" => Ok(Window::OneWeek),
        "1m" => Ok(Window::OneMonth),
        "1y" => Ok(Window::OneYear),
        "max" => Ok(Window::Max),
        _ => Err(ApiError::BadRequest(
            "window must be one of: 1w, 1m, 1y, max".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_accepts_known_tokens() {
        assert_eq!(parse_window("1w").unwrap(), Window::OneWeek);
        assert_eq!(parse_window("1m").unwrap(), Window::OneMonth);
        assert_eq!(parse_window("1y").unwrap(), Window::OneYear);
        assert_eq!(parse_window("max").unwrap(), Window::Max);
    }

    #[test]
    fn test_parse_window_rejects_unknown_tokens() {
        assert!(parse_window("7d").is_err());
        assert!(parse_window("").is_err());
        assert!(parse_window("1W").is_err());
    }
}
