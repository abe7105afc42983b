//! SurfsUp Core Library
//!
//! Shared pieces of the weather API:
//! - Configuration loading (XDG-compliant)
//! - Dataset file checks
//! - Dataset constants

mod config;
pub mod fs;

use time::{macros::date, Date};

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_sqlite_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "surfsup";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the pre-populated observation dataset
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";

/// Last date present in the Hawaii dataset. "Recent" queries are anchored
/// here rather than on the wall clock.
pub const DEFAULT_REFERENCE_DATE: Date = date!(2017 - 08 - 23);

/// Station with the most readings in the Hawaii dataset.
pub const DEFAULT_ACTIVE_STATION: &str = "USC00519281";

/// Length of the "most recent year" window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 365;
