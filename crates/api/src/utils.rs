use anyhow::anyhow;
use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::env;
use surfsup_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_API_PORT, DEFAULT_DATABASE_PATH,
};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::{parse_api_date, DatasetWindow};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "SurfsUp - read-only REST API over the Hawaii weather observation dataset"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $SURFSUP_CONFIG, ./surfsup.toml,
    /// $XDG_CONFIG_HOME/surfsup/surfsup.toml, /etc/surfsup/surfsup.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "SURFSUP_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "SURFSUP_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURFSUP_PORT")]
    pub port: Option<String>,

    /// Public URL used for links on the index page
    #[arg(short, long, env = "SURFSUP_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Path to the pre-populated SQLite observation dataset
    #[arg(short, long, env = "SURFSUP_DATABASE")]
    #[serde(alias = "database_path")]
    pub database: Option<String>,

    /// Last date present in the dataset (YYYY-MM-DD), anchors the "most recent year"
    #[arg(long, env = "SURFSUP_REFERENCE_DATE")]
    pub reference_date: Option<String>,

    /// Station reported by the tobs route
    #[arg(short, long, env = "SURFSUP_ACTIVE_STATION")]
    pub active_station: Option<String>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
    }

    pub fn remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host(), self.port()))
    }

    pub fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
    }

    /// Dataset constants with any configured overrides applied
    pub fn dataset_window(&self) -> anyhow::Result<DatasetWindow> {
        let defaults = DatasetWindow::default();

        let reference_date = match &self.reference_date {
            Some(value) => parse_api_date(value)
                .map_err(|e| anyhow!("invalid reference date {:?}: {}", value, e))?,
            None => defaults.reference_date(),
        };
        let active_station = self
            .active_station
            .clone()
            .unwrap_or_else(|| defaults.active_station().to_string());

        Ok(DatasetWindow::new(reference_date, active_station))
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("SURFSUP_CONFIG", "surfsup.toml")
    };

    if let Some(path) = source.path() {
        log::info!("Loading config from: {}", path.display());
    }

    merge_config(cli_args, load_file_config(&source))
}

/// Config file contents, or defaults when the file cannot be read or parsed
fn load_file_config(source: &ConfigSource) -> Cli {
    load_config(source).unwrap_or_else(|e| {
        log::warn!("Failed to load config from {}, using defaults: {}", source, e);
        Cli::default()
    })
}

/// CLI args (and env vars, handled by clap) win over the config file
fn merge_config(cli_args: Cli, file_config: Cli) -> Cli {
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        domain: cli_args.domain.or(file_config.domain),
        port: cli_args.port.or(file_config.port),
        remote_url: cli_args.remote_url.or(file_config.remote_url),
        database: cli_args.database.or(file_config.database),
        reference_date: cli_args.reference_date.or(file_config.reference_date),
        active_station: cli_args.active_station.or(file_config.active_station),
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                timestamp,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
