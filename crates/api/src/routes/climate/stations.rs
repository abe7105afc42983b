use axum::{extract::State, http::StatusCode, Json};
use itertools::Itertools;
use std::sync::Arc;

use super::dataset_error;
use crate::{AppState, Station};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Distinct station identifiers in storage order", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation dataset")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let stations = state.climate_db.stations().await.map_err(dataset_error)?;
    Ok(Json(station_ids(stations)))
}

pub fn station_ids(stations: Vec<Station>) -> Vec<String> {
    stations
        .into_iter()
        .map(|station| station.station_id)
        .unique()
        .collect()
}
