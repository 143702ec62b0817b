// File: crates/casecurve-core/src/config.rs
// Summary: Runtime configuration (default location, file locations, aggregation policy) from JSON + env.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::DuplicatePolicy;
use crate::error::{Error, Result};
use crate::types::DEFAULT_LOCATION;

pub const ENV_DEFAULT_LOCATION: &str = "CASECURVE_DEFAULT_LOCATION";
pub const ENV_REGISTRY: &str = "CASECURVE_REGISTRY";
pub const ENV_DATA_DIR: &str = "CASECURVE_DATA_DIR";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location shown when the primary slot has no selection.
    pub default_location: String,
    /// JSON location registry.
    pub registry_path: PathBuf,
    /// Root of the saved API replies read by `JsonDirSource`.
    pub data_dir: PathBuf,
    /// First day of upstream data; the window start when no date is picked.
    pub earliest_date: NaiveDate,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            registry_path: PathBuf::from("location_list.json"),
            data_dir: PathBuf::from("data"),
            earliest_date: NaiveDate::from_ymd_opt(2020, 1, 22).unwrap_or_default(),
            duplicate_policy: DuplicatePolicy::Sum,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a JSON config file; missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Override fields from `CASECURVE_*` environment variables.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::with_env`] with an injectable lookup.
    pub fn with_vars<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Result<Self> {
        if let Some(v) = lookup(ENV_DEFAULT_LOCATION) { self.default_location = v; }
        if let Some(v) = lookup(ENV_REGISTRY) { self.registry_path = PathBuf::from(v); }
        if let Some(v) = lookup(ENV_DATA_DIR) { self.data_dir = PathBuf::from(v); }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.default_location.trim().is_empty() {
            return Err(Error::Config("default_location must not be empty".into()));
        }
        Ok(())
    }
}
