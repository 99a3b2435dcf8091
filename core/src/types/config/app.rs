use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Accepted `prune_after_days`: one day to ten years.
pub const PRUNE_AFTER_DAYS: RangeInclusive<u32> = 1..=3650;

/// Accepted `maintenance_interval_hours`: one hour to one year.
pub const MAINTENANCE_INTERVAL_HOURS: RangeInclusive<u32> = 1..=8760;

/// Operator-facing configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !PRUNE_AFTER_DAYS.contains(&self.retention.prune_after_days) {
            errors.push(format!(
                "prune_after_days must be between {} and {}",
                PRUNE_AFTER_DAYS.start(),
                PRUNE_AFTER_DAYS.end()
            ));
        }

        if !MAINTENANCE_INTERVAL_HOURS.contains(&self.retention.maintenance_interval_hours) {
            errors.push(format!(
                "maintenance_interval_hours must be between {} and {}",
                MAINTENANCE_INTERVAL_HOURS.start(),
                MAINTENANCE_INTERVAL_HOURS.end()
            ));
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = RetentionConfig::default();
        let pick = |value: u32, range: &RangeInclusive<u32>, default: u32| {
            if range.contains(&value) { value } else { default }
        };

        Self {
            storage: self.storage.clone(),
            retention: RetentionConfig {
                prune_after_days: pick(
                    self.retention.prune_after_days,
                    &PRUNE_AFTER_DAYS,
                    defaults.prune_after_days,
                ),
                maintenance_interval_hours: pick(
                    self.retention.maintenance_interval_hours,
                    &MAINTENANCE_INTERVAL_HOURS,
                    defaults.maintenance_interval_hours,
                ),
            },
        }
    }
}

/// Where the database lives.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Series retention settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetentionConfig {
    #[serde(default = "default_prune_after_days")]
    pub prune_after_days: u32,
    #[serde(default = "default_maintenance_interval_hours")]
    pub maintenance_interval_hours: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            prune_after_days: default_prune_after_days(),
            maintenance_interval_hours: default_maintenance_interval_hours(),
        }
    }
}

fn default_prune_after_days() -> u32 {
    3
}

fn default_maintenance_interval_hours() -> u32 {
    24
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
