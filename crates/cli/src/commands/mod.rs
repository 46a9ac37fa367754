//! Subcommand implementations. Each opens the classroom from config, runs
//! one action and prints the result.

pub mod ask;
pub mod class;
pub mod history;
pub mod init;
pub mod knowledge;
pub mod overview;
pub mod project;
pub mod rules;
pub mod status;
pub mod student;

use std::path::PathBuf;

use eduassist_classroom::Classroom;
use eduassist_config::AppConfig;
use tracing::debug;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config, apply the `--data` override and open the classroom.
pub fn open(data: Option<PathBuf>) -> Result<(AppConfig, Classroom), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(path) = data {
        config.storage.data_path = Some(path);
    }
    debug!(path = %config.storage.resolved_path().display(), "Opening data file");
    let classroom = Classroom::from_config(&config)
        .map_err(|e| format!("Failed to open data file: {e}"))?;
    Ok((config, classroom))
}

/// Shorten an id for tables.
pub fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
