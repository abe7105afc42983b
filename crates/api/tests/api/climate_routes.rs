use crate::helpers::{daily_stats, observation, spawn_app, station, MockClimateAccess};
use axum::http::StatusCode;
use std::sync::Arc;
use surfsup::{DailyTemperatureStats, Error};
use time::macros::date;

const DATE_ERROR: &str = r#"{"error":"Please use this date format: YYYY-MM-DD."}"#;

fn dataset_down() -> Error {
    Error::Query(sqlx::Error::PoolTimedOut)
}

#[tokio::test]
async fn precipitation_covers_most_recent_year() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .withf(|filter| filter.since == Some(date!(2016 - 08 - 23)) && filter.station_id.is_none())
        .times(1)
        .returning(|_| {
            Ok(vec![
                observation("USC00519397", "2016-08-23", Some(0.0), 81.0),
                observation("USC00513117", "2016-08-23", Some(0.15), 76.0),
                observation("USC00519397", "2016-08-24", Some(0.08), 79.0),
                observation("USC00516128", "2017-08-23", None, 76.0),
            ])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"2016-08-23":0.15,"2016-08-24":0.08,"2017-08-23":null}"#
    );
}

#[tokio::test]
async fn precipitation_fails_when_dataset_is_unreachable() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .times(1)
        .returning(|_| Err(dataset_down()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, _) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn stations_are_distinct_in_storage_order() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_stations().times(1).returning(|| {
        Ok(vec![
            station("USC00519397", "WAIKIKI 717.2, HI US"),
            station("USC00513117", "KANEOHE 838.1, HI US"),
            station("USC00519397", "WAIKIKI 717.2, HI US"),
            station("USC00519281", "WAIHEE 837.5, HI US"),
        ])
    });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"["USC00519397","USC00513117","USC00519281"]"#);
}

#[tokio::test]
async fn tobs_only_queries_most_active_station() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .withf(|filter| {
            filter.station_id.as_deref() == Some("USC00519281")
                && filter.since == Some(date!(2016 - 08 - 23))
        })
        .times(1)
        .returning(|_| {
            Ok(vec![
                observation("USC00519281", "2016-08-23", Some(1.79), 77.0),
                observation("USC00519281", "2016-08-24", Some(2.15), 77.0),
                observation("USC00519281", "2017-08-18", None, 79.0),
            ])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"[{"date":"2016-08-23","temp":77.0},{"date":"2016-08-24","temp":77.0},{"date":"2017-08-18","temp":79.0}]"#
    );
}

#[tokio::test]
async fn start_stats_group_by_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_daily_temperature_stats()
        .withf(|range| range.start == date!(2017 - 08 - 24) && range.end.is_none())
        .times(1)
        .returning(|_| {
            Ok(vec![
                daily_stats("2017-08-24", 77.0, 79.0, 81.0),
                daily_stats("2017-08-25", 79.0, 79.0, 79.0),
            ])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/2017-08-24").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"[{"date":"2017-08-24","min":77.0,"avg":79.0,"max":81.0},{"date":"2017-08-25","min":79.0,"avg":79.0,"max":79.0}]"#
    );

    let stats: Vec<DailyTemperatureStats> = serde_json::from_str(&body).unwrap();
    assert!(stats.windows(2).all(|w| w[0].date < w[1].date));
    assert!(stats.iter().all(|s| s.min <= s.avg && s.avg <= s.max));
    assert!(stats.iter().all(|s| s.date.as_str() >= "2017-08-24"));
}

#[tokio::test]
async fn unpadded_start_date_is_accepted() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_daily_temperature_stats()
        .withf(|range| range.start == date!(2017 - 08 - 05) && range.end.is_none())
        .times(2)
        .returning(|_| Ok(vec![daily_stats("2017-08-05", 74.0, 78.5, 82.0)]));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in ["/api/v1.0/2017-8-5", "/api/v1.0/2017-08-5"] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(
            body,
            r#"[{"date":"2017-08-05","min":74.0,"avg":78.5,"max":82.0}]"#,
            "{uri}"
        );
    }
}

#[tokio::test]
async fn range_stats_pass_inclusive_bounds() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_daily_temperature_stats()
        .withf(|range| {
            range.start == date!(2017 - 01 - 01) && range.end == Some(date!(2017 - 01 - 02))
        })
        .times(1)
        .returning(|_| {
            Ok(vec![
                daily_stats("2017-01-01", 62.0, 69.2, 74.0),
                daily_stats("2017-01-02", 64.0, 68.5, 73.0),
            ])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/2017-01-01/2017-01-02").await;

    assert_eq!(status, StatusCode::OK);
    let stats: Vec<DailyTemperatureStats> = serde_json::from_str(&body).unwrap();
    let dates: Vec<&str> = stats.iter().map(|s| s.date.as_str()).collect();
    assert_eq!(dates, vec!["2017-01-01", "2017-01-02"]);
}

#[tokio::test]
async fn malformed_start_date_returns_error_object() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_daily_temperature_stats().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2017%2F08%2F23",
        "/api/v1.0/2017-8-23x",
        "/api/v1.0/2017-02-30",
        "/api/v1.0/+2017-08-23",
    ] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, DATE_ERROR, "{uri}");
    }
}

#[tokio::test]
async fn malformed_range_date_returns_same_error_either_side() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_daily_temperature_stats().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/not-a-date/2017-08-23",
        "/api/v1.0/2017-08-01/not-a-date",
        "/api/v1.0/2017%2F08%2F01/2017%2F08%2F23",
    ] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, DATE_ERROR, "{uri}");
    }
}

#[tokio::test]
async fn stats_fail_when_dataset_is_unreachable() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_daily_temperature_stats()
        .times(2)
        .returning(|_| Err(dataset_down()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, _) = test_app.get("/api/v1.0/2017-08-01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = test_app.get("/api/v1.0/2017-08-01/2017-08-23").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .times(2)
        .returning(|_| {
            Ok(vec![
                observation("USC00519397", "2017-08-20", Some(0.0), 81.0),
                observation("USC00519281", "2017-08-21", Some(0.56), 76.0),
                observation("USC00519397", "2017-08-21", None, 79.0),
            ])
        });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let first = test_app.get("/api/v1.0/precipitation").await;
    let second = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(first, second);
}
