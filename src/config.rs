//! Configuration loading for the watcher binary.
//!
//! Configuration is a small structured file (JSON, TOML, or YAML — format
//! detected from the extension) holding the list of URLs to watch and the
//! webhook endpoints to notify. Scalar settings can be overridden through
//! `WEBWATCH_`-prefixed environment variables.
//!
//! A missing or unparsable file is not fatal: it is logged and treated as an
//! empty configuration, in which case the run loop performs no-op cycles.

use crate::error::{Result, WatchError};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Default refresh interval between cycles, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Default debounce window for the timestamp strategy, in seconds.
pub const DEFAULT_DEBOUNCE_SECS: u64 = 1800;

/// Static inputs for a watcher run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WatchConfig {
    /// URLs to watch for changes. Immutable for the process lifetime.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Webhook endpoints notified on every detected change.
    #[serde(default)]
    pub webhooks: Vec<String>,

    /// Seconds between refresh cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Minimum elapsed seconds between `Last-Modified` values before a change
    /// is considered meaningful.
    #[serde(default = "default_debounce_secs")]
    pub debounce_secs: u64,
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_debounce_secs() -> u64 {
    DEFAULT_DEBOUNCE_SECS
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            webhooks: Vec::new(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            debounce_secs: DEFAULT_DEBOUNCE_SECS,
        }
    }
}

impl WatchConfig {
    /// Load configuration from a file, falling back to the empty default.
    ///
    /// A missing file or a parse failure is logged as a warning and yields
    /// [`WatchConfig::default`], so the watcher starts with nothing to do
    /// rather than refusing to start.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; starting with empty configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from a file, propagating failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WatchError::ConfigError(format!(
                "{} not found",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("WEBWATCH").separator("__"))
            .build()
            .map_err(|e| {
                WatchError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
            })?;

        settings.try_deserialize::<Self>().map_err(|e| {
            WatchError::ConfigError(format!("Failed to deserialize {}: {}", path.display(), e))
        })
    }
}
