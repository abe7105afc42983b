use surfsup_core::{DEFAULT_ACTIVE_STATION, DEFAULT_REFERENCE_DATE, RECENT_WINDOW_DAYS};
use time::{macros::format_description, Date, Duration};

/// Message returned to clients whose path dates do not parse
pub const DATE_FORMAT_MESSAGE: &str = "Please use this date format: YYYY-MM-DD.";

/// Parse a path date in `YYYY-MM-DD` form. Month and day may drop their
/// leading zero; the year takes no sign.
pub fn parse_api_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(
        value,
        format_description!("[year sign:none]-[month padding:none]-[day padding:none]"),
    )
}

/// Format a date the way the dataset stores it.
pub fn format_api_date(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

/// Fixed facts about the loaded dataset, settled once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetWindow {
    reference_date: Date,
    active_station: String,
}

impl Default for DatasetWindow {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_DATE, DEFAULT_ACTIVE_STATION)
    }
}

impl DatasetWindow {
    pub fn new(reference_date: Date, active_station: impl Into<String>) -> Self {
        Self {
            reference_date,
            active_station: active_station.into(),
        }
    }

    /// Last date present in the dataset
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Station with the most readings
    pub fn active_station(&self) -> &str {
        &self.active_station
    }

    /// First date of the most recent year of data
    pub fn cutoff(&self) -> Date {
        self.reference_date
            .saturating_sub(Duration::days(RECENT_WINDOW_DAYS))
    }
}
