use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::models::CatalogResponse;

/// Sector and relation options for the registration forms' select inputs
pub async fn catalog(State(config): State<AppState>) -> (StatusCode, Json<CatalogResponse>) {
    let body = CatalogResponse {
        sectors: config.catalog.sectors.clone(),
        relations: config.catalog.relations.clone(),
    };

    (StatusCode::OK, Json(body))
}
