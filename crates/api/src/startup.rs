use crate::{
    active_station_temps, db, health, inclusive_temp_stats, index_handler, precipitation, routes,
    start_temp_stats, stations, ClimateData, ClimateDatabase, DatasetWindow,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use surfsup_core::is_sqlite_file;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub dataset: DatasetWindow,
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation::precipitation,
        routes::climate::stations::stations,
        routes::climate::temperatures::active_station_temps,
        routes::climate::temperatures::start_temp_stats,
        routes::climate::temperatures::inclusive_temp_stats,
        routes::health::health,
    ),
    components(
        schemas(
                db::Observation,
                db::Station,
                db::TemperatureReading,
                db::DailyTemperatureStats,
                routes::climate::temperatures::DateFormatError,
                routes::climate::temperatures::TemperatureStatsResponse,
                routes::health::HealthStatus,
        )
    ),
    tags(
        (name = "surfsup weather api", description = "a read-only RESTful api over historical Hawaii precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    database_path: String,
    dataset: DatasetWindow,
) -> Result<AppState, anyhow::Error> {
    if !is_sqlite_file(&database_path) {
        return Err(anyhow!(
            "observation dataset not found or not a SQLite file: {}",
            database_path
        ));
    }

    let climate_db = Arc::new(
        ClimateDatabase::open(&database_path)
            .await
            .map_err(|e| anyhow!("error opening observation dataset: {}", e))?,
    );

    Ok(AppState {
        remote_url,
        dataset,
        climate_db,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(active_station_temps))
        .route("/api/v1.0/{start}", get(start_temp_stats))
        .route("/api/v1.0/{start}/{end}", get(inclusive_temp_stats))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, {} code: {}, time: {}", path, response.status().as_str(), response_time);

    response
}
