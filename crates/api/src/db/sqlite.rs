use async_trait::async_trait;
use log::{debug, info};
use regex::Regex;
use scooby::postgres::{select, Aliasable, Parameters, Select};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    FromRow,
};
use std::{str::FromStr, time::Duration};

use super::{
    ClimateData, DailyTemperatureStats, DateRange, Error, Observation, ObservationFilter, Station,
};
use crate::format_api_date;

/// Read-only handle on the pre-populated observation dataset.
///
/// Each query checks a connection out of the pool for its own duration;
/// nothing is ever written back.
pub struct ClimateDatabase {
    pool: SqlitePool,
}

impl ClimateDatabase {
    pub async fn open(path: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(false)
            .read_only(true)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-16000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("Opened observation dataset at: {}", path);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_all<T>(&self, select: Select, params: Vec<String>) -> Result<Vec<T>, Error>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = sqlite_placeholders(&select.to_string())?;
        debug!("running query: {} with params {:?}", sql, params);

        let mut query = sqlx::query_as::<_, T>(&sql);
        for param in params {
            query = query.bind(param);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// scooby emits postgres style `$n` placeholders, sqlite binds positional `?`
fn sqlite_placeholders(sql: &str) -> Result<String, regex::Error> {
    let re = Regex::new(r"\$(\d+)")?;
    Ok(re.replace_all(sql, "?").into_owned())
}

fn observations_query(filter: &ObservationFilter) -> Result<(Select, Vec<String>), Error> {
    let mut placeholders = Parameters::new();
    let mut values = vec![];

    let mut query = select((
        "station".as_("station_id"),
        "date",
        "CAST(prcp AS REAL)".as_("precipitation"),
        "CAST(tobs AS REAL)".as_("temperature"),
    ))
    .from("measurement");

    if let Some(station_id) = &filter.station_id {
        query = query.where_(format!("station = {}", placeholders.next()));
        values.push(station_id.clone());
    }
    if let Some(since) = filter.since {
        query = query.where_(format!("date >= {}", placeholders.next()));
        values.push(format_api_date(since)?);
    }

    Ok((query, values))
}

fn stations_query() -> Select {
    select((
        "station".as_("station_id"),
        "name",
        "CAST(latitude AS REAL)".as_("latitude"),
        "CAST(longitude AS REAL)".as_("longitude"),
        "CAST(elevation AS REAL)".as_("elevation"),
    ))
    .from("station")
}

fn daily_temperature_query(range: &DateRange) -> Result<(Select, Vec<String>), Error> {
    let mut placeholders = Parameters::new();
    let mut values = vec![];

    let mut query = select((
        "date",
        "CAST(MIN(tobs) AS REAL)".as_("min"),
        "CAST(AVG(tobs) AS REAL)".as_("avg"),
        "CAST(MAX(tobs) AS REAL)".as_("max"),
    ))
    .from("measurement")
    .where_(format!("date >= {}", placeholders.next()));
    values.push(format_api_date(range.start)?);

    if let Some(end) = range.end {
        query = query.where_(format!("date <= {}", placeholders.next()));
        values.push(format_api_date(end)?);
    }

    Ok((query.group_by("date").order_by("date"), values))
}

#[async_trait]
impl ClimateData for ClimateDatabase {
    async fn observations(&self, filter: &ObservationFilter) -> Result<Vec<Observation>, Error> {
        let (query, values) = observations_query(filter)?;
        self.fetch_all(query, values).await
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        self.fetch_all(stations_query(), vec![]).await
    }

    async fn daily_temperature_stats(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyTemperatureStats>, Error> {
        let (query, values) = daily_temperature_query(range)?;
        self.fetch_all(query, values).await
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
