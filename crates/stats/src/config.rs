use domain::services::{SortDirection, SortKey, SortSpec};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Path of the JSON dataset snapshot
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportConfig {
    /// Rows shown in the dashboard field summary
    #[serde(default = "default_summary_rows")]
    #[validate(range(min = 1, max = 1000, message = "Summary rows must be between 1 and 1000"))]
    pub summary_rows: usize,

    #[serde(default = "default_sort_key")]
    pub sort_key: SortKey,

    #[serde(default = "default_sort_direction")]
    pub sort_direction: SortDirection,

    /// First year offered by the harvest year selector
    #[serde(default = "default_first_harvest_year")]
    #[validate(range(min = 1900, max = 9999, message = "First harvest year is out of range"))]
    pub first_harvest_year: i32,

    /// Opacity applied when group colors are stored
    #[serde(default = "default_group_opacity")]
    #[validate(range(min = 0.0, max = 1.0, message = "Group opacity must be between 0 and 1"))]
    pub group_opacity: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_rows: default_summary_rows(),
            sort_key: default_sort_key(),
            sort_direction: default_sort_direction(),
            first_harvest_year: default_first_harvest_year(),
            group_opacity: default_group_opacity(),
        }
    }
}

impl ReportConfig {
    pub fn default_sort(&self) -> SortSpec {
        SortSpec::new(self.sort_key, self.sort_direction)
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_dataset_path() -> String {
    "data/farm.json".to_string()
}
fn default_summary_rows() -> usize {
    7
}
fn default_sort_key() -> SortKey {
    SortKey::Size
}
fn default_sort_direction() -> SortDirection {
    SortDirection::Desc
}
fn default_first_harvest_year() -> i32 {
    2022
}
fn default_group_opacity() -> f64 {
    shared::color::DEFAULT_GROUP_OPACITY
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with FS__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FS").separator("__"))
            .build()?;

        Self::from_source(config)
    }

    /// Load configuration from a TOML string with key overrides.
    ///
    /// Used by tests, which cannot rely on the config directory.
    pub fn load_from_str(
        toml: &str,
        overrides: &[(&str, &str)],
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        Self::from_source(builder.build()?)
    }

    fn from_source(config: config::Config) -> Result<Self, config::ConfigError> {
        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.dataset.path.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "dataset.path".to_string(),
            ));
        }

        self.report
            .validate()
            .map_err(|e| ConfigValidationError::InvalidValue(e.to_string()))?;

        if self.report.group_opacity <= 0.0 {
            return Err(ConfigValidationError::InvalidValue(
                "report.group_opacity must be greater than 0".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(ConfigValidationError::InvalidValue(format!(
                "logging.format must be json or pretty, got {}",
                other
            ))),
        }
    }
}
