use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use kaiwa_core::config::is_valid_timestamp_format;
use kaiwa_core::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid ui.timestamp_format {format:?} in {path}")]
    TimestampFormat { path: PathBuf, format: String },
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kaiwa").join("config.toml"))
}

/// An explicit path must exist. The default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if !is_valid_timestamp_format(&config.ui.timestamp_format) {
        return Err(ConfigError::TimestampFormat {
            path: path.to_path_buf(),
            format: config.ui.timestamp_format,
        });
    }
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
