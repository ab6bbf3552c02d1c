use axum::{routing::get, Router};

use crate::handlers::health;

pub fn api_routes() -> Router {
    Router::new()
        .route("/", get(health::health_check))
        .fallback(health::not_found)
}
