use axum::{Json, extract::State, response::IntoResponse};
use rust_decimal::Decimal;

use stakewatch_db::{StakewatchPool, models::ProtocolSnapshot};
use stakewatch_revenue::calculate_revenue_summary;
use stakewatch_types::CHAIN_CONFIGS;

use crate::{
    AppState,
    dto::{ApiResponse, TickerChain, TickerResponse},
    errors::ApiError,
    helpers::load_revenue_report,
};

#[utoipa::path(
    get,
    path = "/ticker",
    tag = "Overview",
    responses(
        (status = 200, description = "Compact latest-values feed", body = TickerResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_ticker(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let (report, snapshot) = tokio::join!(
        load_revenue_report(&state.pool),
        state.pool.interact_with_context(
            "fetch latest protocol snapshot".to_string(),
            ProtocolSnapshot::find_latest,
        )
    );
    let report = report?;

    let total_stake_usd = match snapshot {
        Ok(snapshot) => Some(snapshot.total_stake_usd),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    let summary = calculate_revenue_summary(&report, &CHAIN_CONFIGS);

    let chains: Vec<TickerChain> = CHAIN_CONFIGS
        .iter()
        .map(|config| {
            let entry = summary
                .as_ref()
                .and_then(|summary| summary.per_chain.get(config.name));
            TickerChain {
                chain: config.name.to_string(),
                token_symbol: config.token_symbol.to_string(),
                token_usd: report.spot_prices.get(config.token_symbol).copied(),
                tvl: entry.map_or(Decimal::ZERO, |entry| entry.tvl),
            }
        })
        .collect();

    Ok(Json(ApiResponse::ok(TickerResponse {
        total_stake_usd,
        total_annual_revenue: summary
            .as_ref()
            .map_or(Decimal::ZERO, |summary| summary.total_annual_revenue),
        chains,
    })))
}
