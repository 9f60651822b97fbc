use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use stakewatch_revenue::{calculate_revenue_summary, filter_window_by};
use stakewatch_types::CHAIN_CONFIGS;

use crate::{
    AppState,
    dto::{
        ApiResponse, ChainRevenueCard, CumulativeRevenuePoint, CumulativeRevenueResponse,
        DailyRevenuePoint, RevenueLatestResponse, RevenueSeriesResponse, WindowQuery,
    },
    errors::ApiError,
    helpers::{load_revenue_report, parse_window},
};

#[utoipa::path(
    get,
    path = "/revenue/series",
    tag = "Revenue",
    params(
        ("window" = String, Query, description = "Time window: 1w, 1m, 1y or max", example = "1m")
    ),
    responses(
        (status = 200, description = "Daily derived revenue series", body = RevenueSeriesResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_revenue_series(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = parse_window(&params.window)?;
    let report = load_revenue_report(&state.pool).await?;

    let points: Vec<DailyRevenuePoint> = filter_window_by(&report.daily, window, |day| day.date)
        .iter()
        .cloned()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::ok(RevenueSeriesResponse {
        window: window.as_str().to_string(),
        points,
    })))
}

#[utoipa::path(
    get,
    path = "/revenue/cumulative",
    tag = "Revenue",
    params(
        ("window" = String, Query, description = "Time window: 1w, 1m, 1y or max", example = "max")
    ),
    responses(
        (status = 200, description = "Cumulative revenue series", body = CumulativeRevenueResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cumulative_revenue(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = parse_window(&params.window)?;
    let report = load_revenue_report(&state.pool).await?;

    let points: Vec<CumulativeRevenuePoint> =
        filter_window_by(&report.cumulative, window, |point| point.date)
            .iter()
            .map(|point| CumulativeRevenuePoint {
                date: point.date.to_string(),
                cumulative_revenue: point.cumulative_revenue,
            })
            .collect();

    Ok(Json(ApiResponse::ok(CumulativeRevenueResponse {
        window: window.as_str().to_string(),
        points,
    })))
}

#[utoipa::path(
    get,
    path = "/revenue/latest",
    tag = "Revenue",
    responses(
        (status = 200, description = "Latest per-chain revenue cards", body = RevenueLatestResponse),
        (status = 404, description = "No revenue derived yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_latest_revenue(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let report = load_revenue_report(&state.pool).await?;
    let summary = calculate_revenue_summary(&report, &CHAIN_CONFIGS)
        .ok_or_else(|| ApiError::NotFound("No revenue derived yet".to_string()))?;

    let chains: Vec<ChainRevenueCard> = summary
        .per_chain
        .iter()
        .filter_map(|(chain, entry)| {
            // per_chain keys come from the config table, so the lookup only
            // misses if the table changed mid-request
            let config = CHAIN_CONFIGS
                .iter()
                .find(|config| config.name == chain.as_str())?;
            Some(ChainRevenueCard {
                chain: chain.clone(),
                token_symbol: config.token_symbol.to_string(),
                color: config.color.to_string(),
                annual_revenue: entry.annual_revenue,
                tvl: entry.tvl,
                apr: entry.apr.clone(),
                daily_native_tokens: entry.daily_native_tokens,
                token_usd: report.spot_prices.get(config.token_symbol).copied(),
            })
        })
        .collect();

    Ok(Json(ApiResponse::ok(RevenueLatestResponse {
        date: summary.date.to_string(),
        total_annual_revenue: summary.total_annual_revenue,
        total_daily_usd: summary.total_daily_usd,
        chains,
    })))
}
