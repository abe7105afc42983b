use axum::{extract::State, http::StatusCode, Json};
use std::{collections::BTreeMap, sync::Arc};

use super::dataset_error;
use crate::{db::ObservationFilter, AppState, Observation};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation keyed by date for the most recent year of data", body = BTreeMap<String, Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation dataset")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, (StatusCode, String)> {
    let filter = ObservationFilter::since(state.dataset.cutoff());
    let observations = state
        .climate_db
        .observations(&filter)
        .await
        .map_err(dataset_error)?;

    Ok(Json(precipitation_by_date(observations)))
}

/// Date is the only key, so when several stations report on the same day
/// the reading that comes last in storage order is the one kept.
pub fn precipitation_by_date(observations: Vec<Observation>) -> BTreeMap<String, Option<f64>> {
    observations
        .into_iter()
        .map(|observation| (observation.date, observation.precipitation))
        .collect()
}
