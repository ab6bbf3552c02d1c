use axum::{
    http::{Method, Uri},
    Json,
};
use shared::api::MessageResponse;

use crate::error::{ApiResult, AppError};

pub const LIVENESS_MESSAGE: &str = "CCL Email Fetcher API is running";

/// Unauthenticated liveness probe.
pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new(LIVENESS_MESSAGE))
}

pub async fn not_found(method: Method, uri: Uri) -> ApiResult<()> {
    Err(AppError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    })
}
