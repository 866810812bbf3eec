/// Dashboard configuration loader - parses dashboard.toml
///
/// Keeps dataset size, page sizes, storage locations, and logging settings
/// out of the code. Every field has a default, so a missing file or a
/// partial file is fine. Environment variables (optionally from `.env`)
/// override the file:
///
///   DWLR_CONFIG          path of the TOML file (default `dashboard.toml`)
///   DWLR_SEED            rng seed for reproducible datasets
///   DWLR_STATION_COUNT   number of stations to generate

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::DEFAULT_PAGE_SIZE;
use crate::generator::DEFAULT_STATION_COUNT;
use crate::logging::LogLevel;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of stations to generate, seeds included.
    pub station_count: usize,
    /// RNG seed. `None` gives a different dataset every run.
    pub seed: Option<u64>,
    /// Rows per filtered researcher page.
    pub page_size: usize,
    /// Stations plotted on the policy map.
    pub map_marker_limit: usize,
    /// Stations listed as "nearby" on the community view.
    pub nearby_limit: usize,
    /// Directory of the local key/value store (accounts, current user).
    pub storage_dir: PathBuf,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            station_count: DEFAULT_STATION_COUNT,
            seed: None,
            page_size: DEFAULT_PAGE_SIZE,
            map_marker_limit: 100,
            nearby_limit: 5,
            storage_dir: PathBuf::from(".dwlr"),
            export_dir: PathBuf::from("exports"),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of debug, info, warn, error.
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> Result<LogLevel, ConfigError> {
        self.level.parse().map_err(ConfigError::Invalid)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Read(String),
    /// The file is not valid TOML or has mistyped fields.
    Parse(String),
    /// A value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "Config read error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses configuration from TOML text and validates it.
pub fn parse_config(contents: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig =
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Loads configuration from `path`. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
    parse_config(&contents)
}

/// Loads `.env`, then the TOML file (explicit path, `DWLR_CONFIG`, or the
/// default path), then applies environment overrides.
pub fn load_config(explicit_path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    // A missing .env is normal.
    dotenv::dotenv().ok();

    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => std::env::var("DWLR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
    };

    let mut config = load_config_file(&path)?;
    apply_env_overrides(
        &mut config,
        std::env::var("DWLR_SEED").ok().as_deref(),
        std::env::var("DWLR_STATION_COUNT").ok().as_deref(),
    )?;
    validate(&config)?;
    Ok(config)
}

/// Applies the seed and station count overrides when present.
pub fn apply_env_overrides(
    config: &mut DashboardConfig,
    seed: Option<&str>,
    station_count: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(raw) = seed {
        let value = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("DWLR_SEED '{}' is not a u64", raw)))?;
        config.seed = Some(value);
    }
    if let Some(raw) = station_count {
        config.station_count = raw.trim().parse().map_err(|_| {
            ConfigError::Invalid(format!("DWLR_STATION_COUNT '{}' is not a count", raw))
        })?;
    }
    Ok(())
}

fn validate(config: &DashboardConfig) -> Result<(), ConfigError> {
    if config.page_size == 0 {
        return Err(ConfigError::Invalid("page_size must be greater than 0".to_string()));
    }
    if config.map_marker_limit == 0 {
        return Err(ConfigError::Invalid(
            "map_marker_limit must be greater than 0".to_string(),
        ));
    }
    config.logging.min_level()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").expect("empty config is valid");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.station_count, 5260);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.map_marker_limit, 100);
        assert_eq!(config.nearby_limit, 5);
    }

    #[test]
    fn test_partial_file_overrides_only_given_fields() {
        let config = parse_config(
            r#"
            station_count = 1000
            seed = 42

            [logging]
            level = "debug"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.station_count, 1000);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.logging.min_level(), Ok(LogLevel::Debug));
        assert!(!config.logging.timestamps);
    }

    #[test]
    fn test_shipped_config_parses() {
        let contents = include_str!("../dashboard.toml");
        let config = parse_config(contents).expect("dashboard.toml should be valid");
        assert_eq!(config.station_count, DEFAULT_STATION_COUNT);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = parse_config("page_size = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let result = parse_config("[logging]\nlevel = \"loud\"");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_mistyped_field_is_parse_error() {
        let result = parse_config("station_count = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config_file(Path::new("/nonexistent/dwlr/dashboard.toml"))
            .expect("missing file falls back to defaults");
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DashboardConfig::default();
        apply_env_overrides(&mut config, Some("7"), Some("200")).expect("valid overrides");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.station_count, 200);

        let err = apply_env_overrides(&mut config, Some("seven"), None);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }
}
