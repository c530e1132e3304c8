//! Filesystem kept in a map, for store tests that should not touch disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::{FileSystem, PortError};

/// Files held in memory, keyed by full path.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>>, PortError> {
        self.files.lock().map_err(|e| format!("memory filesystem lock poisoned: {e}").into())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.files()?
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.files()?.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        // Directories exist implicitly once a file lives under them.
        self.files().is_ok_and(|files| files.keys().any(|k| k.starts_with(path)))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        // BTreeMap keeps the names sorted.
        Ok(self
            .files()?
            .keys()
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }
}
