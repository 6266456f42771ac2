//! Dashboard configuration.
//!
//! Defaults can be overridden by an optional config file (any format the
//! `config` crate understands, picked by extension) and then by CLI flags.
//! Environment variables are not consulted.
//!
//! ```toml
//! url = "http://192.168.1.20:8008/setup/eureka_info?options=detail"
//! interval = 10
//! timeout = "2s"
//! dump_path = "living-room.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, File};
use reqwest::Url;
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::error::{Error, Result};

/// Default status endpoint.
pub const DEFAULT_URL: &str = "http://192.168.8.110:8008/setup/eureka_info?options=detail";
/// Default refresh interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;
/// Default fetch timeout.
pub const DEFAULT_TIMEOUT: &str = "3s";
/// Default file for the one-shot dump.
pub const DEFAULT_DUMP_PATH: &str = "eureka.json";

/// Settings for one dashboard session.
///
/// The menu owns the authoritative copy; each live-loop run gets a clone
/// and treats it as read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Status endpoint (`http://`, `https://` or `file://`).
    pub url: String,
    /// Pause between polls. Whole seconds, at least one.
    pub interval: Duration,
    /// Upper bound for a single fetch.
    pub timeout: Duration,
    /// Default destination for the dump action.
    pub dump_path: PathBuf,
}

/// Shape of the config file.
#[derive(Debug, Deserialize)]
struct FileConfig {
    url: String,
    interval: u64,
    timeout: String,
    dump_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            timeout: Duration::from_secs(3),
            dump_path: PathBuf::from(DEFAULT_DUMP_PATH),
        }
    }
}

impl DashboardConfig {
    /// Load defaults, overlaid with `path` if given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("url", DEFAULT_URL)
            .and_then(|b| b.set_default("interval", DEFAULT_INTERVAL_SECS))
            .and_then(|b| b.set_default("timeout", DEFAULT_TIMEOUT))
            .and_then(|b| b.set_default("dump_path", DEFAULT_DUMP_PATH))
            .map_err(config_error)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let raw: FileConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;

        let timeout = parse_duration(&raw.timeout)
            .map_err(|e| Error::Config(format!("timeout: {e}")))?;

        let config = Self {
            url: raw.url,
            interval: Duration::from_secs(raw.interval),
            timeout,
            dump_path: raw.dump_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants: parseable URL, interval of at least one
    /// second, non-zero timeout.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.url).map_err(|e| Error::Config(format!("url {:?}: {e}", self.url)))?;
        if self.interval.as_secs() == 0 {
            return Err(Error::Config("interval must be at least 1 second".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Refresh interval in whole seconds.
    pub fn interval_secs(&self) -> u64 {
        self.interval.as_secs()
    }
}

fn config_error(err: ::config::ConfigError) -> Error {
    Error::Config(err.to_string())
}
