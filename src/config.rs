// config.rs

use crate::error::Result;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `SERIALMIDI_INPUT_DEVICE`
pub const ENV_PREFIX: &str = "SERIALMIDI";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1;

/// Runtime settings, layered as defaults < settings file < environment.
/// Command line flags are applied on top by the binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Substring of the input port name
    pub input_device: Option<String>,
    /// Substring of the output port name
    pub output_device: Option<String>,
    /// Transmit channel, 0..=15
    pub channel: u8,
    /// Sleep between polls when no byte is available
    pub poll_interval_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_device: None,
            output_device: None,
            channel: 0,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from the optional file and the environment.
    ///
    /// Runs before the logger exists, so it does not log.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Falls back to `Info` for unknown level names
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
