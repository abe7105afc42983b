use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::dataset_error;
use crate::{
    db::{DateRange, ObservationFilter},
    parse_api_date, AppState, DailyTemperatureStats, TemperatureReading, DATE_FORMAT_MESSAGE,
};

/// Body returned instead of statistics when a path date does not parse
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DateFormatError {
    pub error: String,
}

impl Default for DateFormatError {
    fn default() -> Self {
        Self {
            error: DATE_FORMAT_MESSAGE.to_string(),
        }
    }
}

/// Served with 200 OK in both cases
#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum TemperatureStatsResponse {
    Stats(Vec<DailyTemperatureStats>),
    InvalidDate(DateFormatError),
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature readings of the most active station for the most recent year of data", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation dataset")
    ))]
pub async fn active_station_temps(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, (StatusCode, String)> {
    let filter = ObservationFilter::since(state.dataset.cutoff())
        .for_station(state.dataset.active_station());
    let observations = state
        .climate_db
        .observations(&filter)
        .await
        .map_err(dataset_error)?;

    Ok(Json(
        observations
            .into_iter()
            .map(TemperatureReading::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Daily min/avg/max temperature from the start date onward, or a date format error", body = TemperatureStatsResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation dataset")
    ))]
pub async fn start_temp_stats(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStatsResponse>, (StatusCode, String)> {
    let start = match parse_api_date(&start) {
        Ok(date) => date,
        Err(e) => {
            warn!("rejected start date {:?}: {}", start, e);
            return Ok(Json(TemperatureStatsResponse::InvalidDate(
                DateFormatError::default(),
            )));
        }
    };

    temperature_stats(&state, DateRange::starting(start)).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Daily min/avg/max temperature between both dates inclusive, or a date format error", body = TemperatureStatsResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation dataset")
    ))]
pub async fn inclusive_temp_stats(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStatsResponse>, (StatusCode, String)> {
    let range = match (parse_api_date(&start), parse_api_date(&end)) {
        (Ok(start), Ok(end)) => DateRange::between(start, end),
        _ => {
            warn!("rejected date range {:?} to {:?}", start, end);
            return Ok(Json(TemperatureStatsResponse::InvalidDate(
                DateFormatError::default(),
            )));
        }
    };

    temperature_stats(&state, range).await
}

async fn temperature_stats(
    state: &AppState,
    range: DateRange,
) -> Result<Json<TemperatureStatsResponse>, (StatusCode, String)> {
    let stats = state
        .climate_db
        .daily_temperature_stats(&range)
        .await
        .map_err(dataset_error)?;

    Ok(Json(TemperatureStatsResponse::Stats(stats)))
}
