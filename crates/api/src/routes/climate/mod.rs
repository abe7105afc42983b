pub mod precipitation;
pub mod stations;
pub mod temperatures;

pub use precipitation::*;
pub use stations::*;
pub use temperatures::*;

use axum::http::StatusCode;
use log::error;

use crate::db;

pub(crate) fn dataset_error(err: db::Error) -> (StatusCode, String) {
    error!("error querying observation dataset: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to query observation dataset: {}", err),
    )
}
