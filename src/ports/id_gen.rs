//! Id generator port for redirect UUIDs.

/// Produces the stable unique id stored alongside each redirect.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier.
    fn generate_id(&self) -> String;
}
