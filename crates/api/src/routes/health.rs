use axum::{extract::State, http::StatusCode, Json};
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Observation dataset is reachable", body = HealthStatus),
        (status = SERVICE_UNAVAILABLE, description = "Observation dataset cannot be queried")
    ))]
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthStatus>, (StatusCode, String)> {
    state.climate_db.health_check().await.map_err(|e| {
        error!("health check failed: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Observation dataset unavailable: {}", e),
        )
    })?;

    Ok(Json(HealthStatus {
        status: String::from("ok"),
    }))
}
