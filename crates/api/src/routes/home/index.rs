use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{templates::home_page, AppState};

/// Every route listed on the index, with what it returns
pub const API_ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/precipitation",
        "Precipitation by date for the most recent year of data",
    ),
    ("/api/v1.0/stations", "Identifiers of every weather station"),
    (
        "/api/v1.0/tobs",
        "Temperature readings of the most active station for the most recent year",
    ),
    (
        "/api/v1.0/<start>",
        "Daily min, avg and max temperature from a YYYY-MM-DD start date",
    ),
    (
        "/api/v1.0/<start>/<end>",
        "Daily min, avg and max temperature between two YYYY-MM-DD dates, inclusive",
    ),
];

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(home_page(&state.remote_url, API_ROUTES).into_string())
}
