use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::storage::{JsonFileStorage, LogStorage, Storage, TODO_FILE};
use crate::model::config::{Config, StorageBackend};

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "ticklist.toml";

/// Environment variable naming the data directory
pub const DIR_ENV: &str = "TICKLIST_DIR";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Resolve the data directory: explicit flag, then `$TICKLIST_DIR`, then cwd.
pub fn resolve_data_dir(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(dir) = std::env::var(DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    Ok(std::env::current_dir()?)
}

/// Read `ticklist.toml` from the data directory. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

/// Build the storage backend the config asks for
pub fn open_storage(data_dir: &Path, config: &Config) -> Box<dyn Storage> {
    match config.storage.backend {
        StorageBackend::Memory => Box::new(LogStorage),
        StorageBackend::File => {
            let file = config.storage.file.as_deref().unwrap_or(TODO_FILE);
            Box::new(JsonFileStorage::new(data_dir.join(file)))
        }
    }
}
