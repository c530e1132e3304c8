//! In-process adapters with deterministic behavior.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod messages;
pub mod redirects;

pub use clock::FixedClock;
pub use filesystem::MemoryFileSystem;
pub use id_gen::SequentialIdGenerator;
pub use messages::CollectingMessenger;
pub use redirects::MemoryRedirectStore;
