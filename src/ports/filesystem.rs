//! Filesystem port backing the file redirect store.

use std::path::Path;

use super::PortError;

/// Disk access needed by [`crate::store::FileRedirectStore`].
pub trait FileSystem: Send + Sync {
    /// Reads a whole UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Creates or replaces a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// File names directly under `path`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a readable directory.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError>;
}
