use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use futures::future::join_all;

use stakewatch_db::{DatabaseError, StakewatchPool, models::HistoricalMetric};
use stakewatch_revenue::{filter_window_by, resolve_apr_strict};
use stakewatch_types::{CHAIN_CONFIGS, ChainConfig, MetricKind, PoolLayout, chain_config};

use crate::{
    AppState,
    dto::{
        ApiResponse, ChainListItem, ChainListResponse, ChainSeriesPoint, ChainSeriesQuery,
        ChainSeriesResponse,
    },
    errors::ApiError,
    helpers::parse_window,
};

async fn latest_row_or_none(
    state: &AppState,
    config: &'static ChainConfig,
    kind: MetricKind,
) -> Result<Option<HistoricalMetric>, DatabaseError> {
    let result = state
        .pool
        .interact_with_context(
            format!("fetch latest {} for {}", kind.as_str(), config.name),
            move |conn| HistoricalMetric::find_latest(config.name, kind, conn),
        )
        .await;
    match result {
        Ok(row) => Ok(Some(row)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[utoipa::path(
    get,
    path = "/chains",
    tag = "Chains",
    responses(
        (status = 200, description = "Configured chains with latest observations", body = ChainListResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_chains(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    // Latest rows per chain are independent reads, fetch them in parallel
    let fetch_futures = CHAIN_CONFIGS.iter().map(|config| {
        let state = state.clone();
        async move {
            let stake = latest_row_or_none(&state, config, MetricKind::TotalStake).await?;
            let delegators = latest_row_or_none(&state, config, MetricKind::DelegatorCount).await?;

            let apr = stake
                .as_ref()
                .map(|row| resolve_apr_strict(row.apr, config.default_apr));

            Ok::<ChainListItem, ApiError>(ChainListItem {
                chain: config.name.to_string(),
                token_symbol: config.token_symbol.to_string(),
                color: config.color.to_string(),
                dual_pool: matches!(config.pools, PoolLayout::DualPool { .. }),
                total_stake: stake.as_ref().and_then(|row| row.value),
                total_stake_usd: stake.as_ref().and_then(|row| row.value_usd),
                apr,
                token_usd: stake.as_ref().and_then(|row| row.token_usd),
                delegators: delegators.as_ref().and_then(|row| row.value),
                last_updated: stake.as_ref().map(|row| row.timestamp.to_rfc3339()),
            })
        }
    });

    let items: Vec<ChainListItem> = join_all(fetch_futures)
        .await
        .into_iter()
        .collect::<Result<_, _>>()?;

    Ok(Json(ApiResponse::ok(ChainListResponse { items })))
}

#[utoipa::path(
    get,
    path = "/chains/{chain}/series",
    tag = "Chains",
    params(
        ("chain" = String, Path, description = "Configured chain name", example = "celestia"),
        ("metric" = String, Query, description = "Metric to return: total_stake or delegator_count", example = "total_stake"),
        ("window" = String, Query, description = "Time window: 1w, 1m, 1y or max", example = "max")
    ),
    responses(
        (status = 200, description = "Raw metric history for one chain", body = ChainSeriesResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 404, description = "Chain not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_chain_series(
    State(state): State<AppState>,
    Path(chain): Path<String>,
    Query(params): Query<ChainSeriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = parse_window(&params.window)?;

    let kind = match params.metric.as_str() {
        "total_stake" => MetricKind::TotalStake,
        "delegator_count" => MetricKind::DelegatorCount,
        _ => {
            return Err(ApiError::BadRequest(
                "metric must be either 'total_stake' or 'delegator_count'".to_string(),
            ));
        }
    };

    let Some(config) = chain_config(&chain) else {
        return Err(ApiError::NotFound(format!("Chain {chain} not found")));
    };

    let rows = state
        .pool
        .interact_with_context(
            format!("fetch {} series for {}", kind.as_str(), config.name),
            move |conn| HistoricalMetric::find_series(config.name, kind, conn),
        )
        .await?;

    let points: Vec<ChainSeriesPoint> =
        filter_window_by(&rows, window, |row| row.timestamp.date_naive())
            .iter()
            .map(|row| ChainSeriesPoint {
                t: row.timestamp.to_rfc3339(),
                value: row.value,
                value_usd: row.value_usd,
                apr: row.apr,
                token_usd: row.token_usd,
            })
            .collect();

    Ok(Json(ApiResponse::ok(ChainSeriesResponse {
        chain: config.name.to_string(),
        metric: kind.as_str().to_string(),
        window: window.as_str().to_string(),
        points,
    })))
}
