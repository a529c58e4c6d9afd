use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::models::HealthResponse;
use crate::utils::current_timestamp;

pub async fn health(State(config): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let body = HealthResponse {
        status: "healthy".to_string(),
        timestamp: current_timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.server.environment.clone(),
    };

    (StatusCode::OK, Json(body))
}
