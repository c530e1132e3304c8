//! Redirect store port.

use super::PortError;
use crate::redirect::{NewRedirect, RedirectRecord};

/// Storage of redirect records.
///
/// The reconciler only reads by source path and creates; it never updates
/// or deletes. Implementations must let a lookup observe records created by
/// earlier calls on the same store.
pub trait RedirectStore: Send + Sync {
    /// Records whose source path equals `path` exactly.
    ///
    /// Callers take the first element when several match.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn find_by_source_path(&self, path: &str) -> Result<Vec<RedirectRecord>, PortError>;

    /// Persists a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn create(&self, redirect: NewRedirect) -> Result<RedirectRecord, PortError>;

    /// Every stored record, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self) -> Result<Vec<RedirectRecord>, PortError>;
}
