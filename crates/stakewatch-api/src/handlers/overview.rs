use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use stakewatch_db::{StakewatchPool, models::ProtocolSnapshot};
use stakewatch_revenue::filter_window_by;

use crate::{
    AppState,
    dto::{ApiResponse, OverviewSeriesResponse, ProtocolSnapshotDto, WindowQuery},
    errors::{ApiError, DatabaseErrorExt},
    helpers::parse_window,
};

#[utoipa::path(
    get,
    path = "/overview/latest",
    tag = "Overview",
    responses(
        (status = 200, description = "Latest protocol snapshot", body = ProtocolSnapshotDto),
        (status = 404, description = "No snapshot recorded yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_latest_overview(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .pool
        .interact_with_context(
            "fetch latest protocol snapshot".to_string(),
            ProtocolSnapshot::find_latest,
        )
        .await
        .map_err(|e| e.or_not_found("No protocol snapshot recorded yet".to_string()))?;

    Ok(Json(ApiResponse::ok(ProtocolSnapshotDto::from(snapshot))))
}

#[utoipa::path(
    get,
    path = "/overview/series",
    tag = "Overview",
    params(
        ("window" = String, Query, description = "Time window: 1w, 1m, 1y or max", example = "1y")
    ),
    responses(
        (status = 200, description = "Protocol snapshot history", body = OverviewSeriesResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_overview_series(
    State(state): State<AppState>,
    Query(params): Query<WindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = parse_window(&params.window)?;
    let snapshots = state
        .pool
        .interact_with_context(
            "fetch protocol snapshot series".to_string(),
            ProtocolSnapshot::find_series,
        )
        .await?;

    let points: Vec<ProtocolSnapshotDto> =
        filter_window_by(&snapshots, window, |snapshot| snapshot.timestamp.date_naive())
            .iter()
            .cloned()
            .map(Into::into)
            .collect();

    Ok(Json(ApiResponse::ok(OverviewSeriesResponse {
        window: window.as_str().to_string(),
        points,
    })))
}
