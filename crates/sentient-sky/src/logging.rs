//! File logging; the terminal itself belongs to the sky.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use sentient_sky_config::{Config, data_dir};
use tracing::Level;

/// Log file name inside the data directory.
const LOG_FILE: &str = "sentient-sky.log";

/// Install the global subscriber. Returns the log file path, or `None`
/// when logging is disabled or the platform has no data directory.
pub fn init(config: &Config) -> color_eyre::Result<Option<PathBuf>> {
    if !config.log_file {
        return Ok(None);
    }
    let Some(dir) = data_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(parse_level(&config.log_level))
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))?;

    Ok(Some(path))
}

/// Unknown level names fall back to `info`.
fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}
