//! Configuration file discovery for the CLI.
//!
//! An explicit `--config` path always wins and must exist. Otherwise the first
//! file found among [`ConfigSource::Local`] and [`ConfigSource::System`] is
//! used, and the built-in defaults apply when neither exists. Whatever is
//! loaded is validated before the engine sees it.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use swimlane::{SwimlaneError, config::AppConfig};

const LOCAL_CONFIG: &str = "swimlane/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration in {path}: {reason}")]
    Validation { path: PathBuf, reason: String },
}

impl From<ConfigError> for SwimlaneError {
    fn from(err: ConfigError) -> Self {
        SwimlaneError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Passed with `--config`.
    Explicit,
    /// `swimlane/config.toml` under the working directory.
    Local,
    /// `config.toml` in the platform config directory.
    System,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigSource::Explicit => "explicit",
            ConfigSource::Local => "local",
            ConfigSource::System => "system",
        })
    }
}

/// Loads the configuration for a run.
///
/// # Errors
///
/// Fails when an explicit path does not exist, or when the chosen file
/// cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SwimlaneError> {
    let found = match explicit_path {
        Some(path) => Some((path.as_ref().to_path_buf(), ConfigSource::Explicit)),
        None => discover(),
    };

    let Some((path, source)) = found else {
        debug!("No configuration file found, using defaults");
        return Ok(AppConfig::default());
    };

    info!(
        path = path.display().to_string(),
        source = source.to_string();
        "Loading configuration"
    );
    read_config(&path)
}

/// Returns the first existing implicit configuration file.
fn discover() -> Option<(PathBuf, ConfigSource)> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some((local, ConfigSource::Local));
    }

    let Some(dirs) = ProjectDirs::from("com", "swimlane", "swimlane") else {
        debug!("Platform config directory is unknown");
        return None;
    };
    let system = dirs.config_dir().join("config.toml");
    if system.exists() {
        Some((system, ConfigSource::System))
    } else {
        debug!(path = system.display().to_string(); "System configuration file not found");
        None
    }
}

fn read_config(path: &Path) -> Result<AppConfig, SwimlaneError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate().map_err(|err| ConfigError::Validation {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    Ok(config)
}
