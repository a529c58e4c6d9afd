use axum::{http::StatusCode, Json};

use crate::models::{DashboardStats, StatsResponse};

pub async fn stats() -> (StatusCode, Json<StatsResponse>) {
    (StatusCode::OK, Json(StatsResponse::current()))
}

/// Series for the progress line chart and sector doughnut, plus the activity feed
pub async fn dashboard_stats() -> (StatusCode, Json<DashboardStats>) {
    (StatusCode::OK, Json(DashboardStats::current()))
}
