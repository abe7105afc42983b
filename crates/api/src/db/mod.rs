pub mod climate_data;
pub mod sqlite;

pub use climate_data::*;
pub use sqlite::ClimateDatabase;
