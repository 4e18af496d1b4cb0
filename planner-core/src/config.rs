//! Planner configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{PlannerError, PlannerResult};
use crate::views::dashboard::UPCOMING_LIMIT;

static DEFAULT_DATA_DIR: &str = "~/.event-planner";
static DEFAULT_EVENTS_FILE: &str = "events.json";
static DEFAULT_LOG_LEVEL: &str = "warn";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn default_upcoming_limit() -> usize {
    UPCOMING_LIMIT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration at ~/.config/event-planner/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Where the local event slot lives
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// JSON file used by the shell bridge, relative to the working directory
    /// unless absolute
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,

    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
            events_file: default_events_file(),
            upcoming_limit: default_upcoming_limit(),
            log_level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("event-planner");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out file there
    /// on first run.
    pub fn load() -> PlannerResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }

    /// The bridge file with `~` expanded.
    pub fn events_file_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned())
    }

    /// Write a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# event planner configuration

# Where the local event list is kept:
# data_dir = \"{}\"

# JSON file read and written by planner-shell (and by export/import):
# events_file = \"{}\"

# Rows in the dashboard's upcoming widget:
# upcoming_limit = {}

# Log filter used when RUST_LOG is not set:
# log_level = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_EVENTS_FILE, UPCOMING_LIMIT, DEFAULT_LOG_LEVEL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
