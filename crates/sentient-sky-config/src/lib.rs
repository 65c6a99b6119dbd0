//! Configuration for the sentient-sky terminal host.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file is not an error; every key falls back to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Allowed frame rates.
const FRAME_RATE_RANGE: (u32, u32) = (1, 240);

/// Errors raised while reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Host settings. The sky itself has no knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per second.
    pub frame_rate: u32,
    /// Device pixels per logical unit reported to the sky.
    pub pixel_ratio: f64,
    /// Fixed RNG seed for a reproducible sky.
    pub seed: Option<u64>,
    /// Minimum log level.
    pub log_level: String,
    /// Whether to write a log file at all.
    pub log_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            pixel_ratio: 1.0,
            seed: None,
            log_level: "info".to_string(),
            log_file: true,
        }
    }
}

impl Config {
    /// Load from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Frame rate clamped into the supported range.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate.clamp(FRAME_RATE_RANGE.0, FRAME_RATE_RANGE.1)
    }

    /// Time budget of one frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "sentient-sky")
}

/// Location of `config.toml`, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Directory for the log file, if the platform has a data directory.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}
