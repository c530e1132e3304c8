//! Service context bundling the port trait objects.

use chrono::{DateTime, Utc};

use crate::adapters::live::{DiskFileSystem, SystemClock, TerminalMessenger, UuidGenerator};
use crate::adapters::memory::{
    CollectingMessenger, FixedClock, MemoryFileSystem, SequentialIdGenerator,
};
use crate::ports::{Clock, FileSystem, IdGenerator, MessageSink};

/// Bundles the ports a command needs.
///
/// Commands receive the context explicitly; nothing is looked up globally.
/// Fields are public so callers can swap a single port.
pub struct ServiceContext {
    /// Timestamps for created redirects.
    pub clock: Box<dyn Clock>,
    /// Disk access for the file store.
    pub fs: Box<dyn FileSystem>,
    /// UUIDs for created redirects.
    pub id_gen: Box<dyn IdGenerator>,
    /// Where user-facing notices go.
    pub messages: Box<dyn MessageSink>,
}

impl ServiceContext {
    /// Real disk, wall clock, random UUIDs and terminal output.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(SystemClock),
            fs: Box::new(DiskFileSystem),
            id_gen: Box::new(UuidGenerator),
            messages: Box::new(TerminalMessenger),
        }
    }

    /// Fully in-process context: empty memory filesystem, clock frozen at
    /// the Unix epoch, sequential ids and a collecting messenger.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            clock: Box::new(FixedClock::new(DateTime::<Utc>::default())),
            fs: Box::new(MemoryFileSystem::new()),
            id_gen: Box::new(SequentialIdGenerator::new("redirect")),
            messages: Box::new(CollectingMessenger::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn in_memory_context_is_deterministic() {
        let ctx = ServiceContext::in_memory();
        assert_eq!(ctx.clock.now().to_rfc3339(), "1970-01-01T00:00:00+00:00");
        assert_eq!(ctx.id_gen.generate_id(), "redirect-1");
        assert!(!ctx.fs.exists(Path::new("/store")));
    }
}
