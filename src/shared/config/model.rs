use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::command::types::Granularity;
use crate::engine::normalize::{FieldAliases, RecordSchema, SchemaPreset};
use crate::shared::datetime::season::{default_fallback_season, default_seasons};
use crate::shared::datetime::{SeasonCalendar, SeasonCalendarError, SeasonDef};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub aggregation: AggregationConfig,
    pub schema: SchemaConfig,
    pub prediction: PredictionConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Daily-rolling log files are written here when set.
    pub log_dir: Option<String>,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub default_granularity: Granularity,
    /// Seasons in chronological order within a year.
    pub seasons: Vec<SeasonDef>,
    /// Season for months no entry in `seasons` lists.
    pub fallback_season: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            default_granularity: Granularity::Month,
            seasons: default_seasons(),
            fallback_season: default_fallback_season(),
        }
    }
}

impl AggregationConfig {
    pub fn calendar(&self) -> Result<SeasonCalendar, SeasonCalendarError> {
        SeasonCalendar::new(self.seasons.clone(), self.fallback_season.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub preset: SchemaPreset,
    /// Extra column aliases, tried before the preset's own.
    pub aliases: FieldAliases,
}

impl SchemaConfig {
    pub fn record_schema(&self) -> RecordSchema {
        RecordSchema::preset(self.preset).with_extra_aliases(&self.aliases)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub program: PathBuf,
    pub script: Option<String>,
    pub mode: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub timeout_secs: u64,
    /// Per-feature fallback values. Features missing here are never filled with zero.
    pub defaults: BTreeMap<String, f64>,
    /// JSON-lines rainfall history (district, year, month, lags).
    pub rainfall_history: Option<PathBuf>,
    /// JSON-lines production history (district, year, area, yield).
    pub production_history: Option<PathBuf>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("python3"),
            script: Some("predict.py".to_string()),
            mode: Some("single".to_string()),
            working_dir: None,
            timeout_secs: 30,
            defaults: BTreeMap::new(),
            rainfall_history: None,
            production_history: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON-lines dataset read by the CLI.
    pub path: Option<PathBuf>,
}

/// Load settings from `path` (or `$CROP_SERIES_CONFIG`, or `config`), any extension the
/// `config` crate understands, then `CROP_SERIES__SECTION__KEY` environment overrides.
/// A missing file is not an error; every value has a default.
pub fn load_settings(path: Option<&str>) -> Result<Settings, config::ConfigError> {
    let config_path = path
        .map(str::to_string)
        .or_else(|| env::var("CROP_SERIES_CONFIG").ok())
        .unwrap_or_else(|| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::with_prefix("CROP_SERIES").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
