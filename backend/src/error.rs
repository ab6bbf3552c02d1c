//! Error type for the HTTP surface. Handlers return [`ApiResult`] and the
//! error renders itself as a JSON [`ErrorResponse`] with a matching status.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use shared::api::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No route matched the request
    #[error("Route {path} not found")]
    RouteNotFound { method: Method, path: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::RouteNotFound { method, path } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::with_details(
                    self.to_string(),
                    format!("No handler for {} {}", method, path),
                ),
            ),
        };
        tracing::debug!("Responding {}: {}", status, self);

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, AppError>;
