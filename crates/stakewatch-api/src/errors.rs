use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use stakewatch_db::DatabaseError;
use thiserror::Error;

use crate::dto::ApiResponse;

#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // NOTE: Error is already logged in the DatabaseError layer
        match err {
            DatabaseError::NotFound { .. } => {
                Self::NotFound("The requested resource was not found".to_string())
            }
            DatabaseError::PoolError { .. }
            | DatabaseError::InteractionError { .. }
            | DatabaseError::QueryError { .. }
            | DatabaseError::UniqueViolation { .. }
            | DatabaseError::ForeignKeyViolation { .. } => {
                // Don't expose internal database details to clients
                Self::InternalServerError
            }
        }
    }
}

/// Extension trait for `DatabaseError` to provide convenient conversion to `ApiError`
pub trait DatabaseErrorExt {
    /// Convert to `ApiError` with a custom `NotFound` message, or use default conversion
    fn or_not_found(self, message: String) -> ApiError;
}

impl DatabaseErrorExt for DatabaseError {
    fn or_not_found(self, message: String) -> ApiError {
        if self.is_not_found() {
            ApiError::NotFound(message)
        } else {
            self.into()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        let response: ApiResponse<()> = ApiResponse::error(msg);
        (status, Json(response)).into_response()
    }
}
