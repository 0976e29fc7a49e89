use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::Todo;
use crate::ops::transfer::{self, TransferError};

/// Default file name for the JSON backend
pub const TODO_FILE: &str = "todos.json";

/// Error type for storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("corrupt todo file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: TransferError,
    },
    #[error("could not encode todos: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Save/load contract for the todo collection.
///
/// Both operations are fallible; callers decide how to degrade. The store
/// logs save failures and treats any load failure as an empty collection.
/// `load` returns `None` when nothing has been stored yet, which is distinct
/// from a stored empty collection.
pub trait Storage {
    fn save(&self, items: &[Todo]) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<Vec<Todo>>, StorageError>;
}

/// Storage that keeps nothing: saves are logged, loads come back empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStorage;

impl Storage for LogStorage {
    fn save(&self, items: &[Todo]) -> Result<(), StorageError> {
        tracing::debug!(count = items.len(), "todos saved (memory backend, nothing written)");
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<Todo>>, StorageError> {
        Ok(None)
    }
}

/// Todos kept as a pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    /// Storage at `<dir>/todos.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TODO_FILE))
    }
}

impl Storage for JsonFileStorage {
    fn save(&self, items: &[Todo]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(count = items.len(), path = %self.path.display(), "todos saved");
        Ok(())
    }

    /// Records get the same checks as an import: unique non-zero ids,
    /// non-blank titles, a creation timestamp.
    fn load(&self) -> Result<Option<Vec<Todo>>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let items = transfer::parse_import(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(items))
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
