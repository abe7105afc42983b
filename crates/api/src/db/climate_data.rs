use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Failed to rewrite query placeholders: {0}")]
    Placeholder(#[from] regex::Error),
}

/// Read access to the observation dataset.
///
/// Every method is a single query; nothing is cached between calls.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Raw observations, in storage order, narrowed by `filter`.
    async fn observations(&self, filter: &ObservationFilter) -> Result<Vec<Observation>, Error>;
    /// All rows of the station table, in storage order.
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// Per-date min/avg/max of the temperature readings in `range`, ascending by date.
    async fn daily_temperature_stats(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyTemperatureStats>, Error>;
    async fn health_check(&self) -> Result<(), Error>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservationFilter {
    pub station_id: Option<String>,
    /// Inclusive lower bound on the observation date
    pub since: Option<Date>,
}

impl ObservationFilter {
    pub fn since(date: Date) -> Self {
        Self {
            station_id: None,
            since: Some(date),
        }
    }

    pub fn for_station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }
}

/// Inclusive date range, open-ended when `end` is `None`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn starting(start: Date) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// One row of the `measurement` table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct Observation {
    pub station_id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation in inches, missing on some readings
    pub precipitation: Option<f64>,
    /// Observed temperature in degrees Fahrenheit
    pub temperature: f64,
}

/// One row of the `station` table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureReading {
    pub date: String,
    pub temp: f64,
}

impl From<Observation> for TemperatureReading {
    fn from(observation: Observation) -> Self {
        Self {
            date: observation.date,
            temp: observation.temperature,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct DailyTemperatureStats {
    pub date: String,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}
