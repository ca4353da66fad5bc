//! Settings management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tether_core::SimulationClock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick rate must be at least 1 Hz, got {0}")]
    InvalidTickRate(u32),

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    pub runtime: RuntimeSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub tick_rate_hz: u32,
    /// Ticks the demo loop runs before shutting down.
    pub demo_ticks: u64,
    /// JavaScript behaviours to spawn, one entity each.
    pub scripts: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// Prepended by the host to every line a script logs.
    pub script_prefix: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: tether_core::time::DEFAULT_TICK_RATE_HZ,
            demo_ticks: 120,
            scripts: Vec::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            script_prefix: "[Script] ".to_string(),
        }
    }
}

impl ScriptSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a file. Relative script paths are taken relative to the
    /// directory holding the settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            settings.resolve_scripts(base);
        }
        Ok(settings)
    }

    fn resolve_scripts(&mut self, base: &Path) {
        for script in &mut self.runtime.scripts {
            if script.is_relative() {
                *script = base.join(&*script);
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.runtime.tick_rate_hz == 0 {
            return Err(SettingsError::InvalidTickRate(0));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<tracing::Level, SettingsError> {
        self.logging
            .level
            .parse()
            .map_err(|_| SettingsError::InvalidLogLevel(self.logging.level.clone()))
    }

    pub fn clock(&self) -> SimulationClock {
        SimulationClock::new(self.runtime.tick_rate_hz)
    }
}
