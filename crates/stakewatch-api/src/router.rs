use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, handlers};

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();

    let revenue_router = Router::new()
        .route("/series", get(handlers::get_revenue_series))
        .route("/cumulative", get(handlers::get_cumulative_revenue))
        .route("/latest", get(handlers::get_latest_revenue));

    let overview_router = Router::new()
        .route("/latest", get(handlers::get_latest_overview))
        .route("/series", get(handlers::get_overview_series));

    let chains_router = Router::new()
        .route("/", get(handlers::list_chains))
        .route("/{chain}/series", get(handlers::get_chain_series));

    Router::new()
        .route("/health", get(health))
        .nest("/v1/revenue", revenue_router)
        .nest("/v1/overview", overview_router)
        .nest("/v1/chains", chains_router)
        .route("/v1/ticker", get(handlers::get_ticker))
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
