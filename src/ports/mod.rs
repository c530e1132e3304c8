//! Port traits for everything the reconciler talks to.
//!
//! The core never reaches for a global service: redirect storage, user
//! messaging, time, ids and disk access are all passed in as trait objects.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod messages;
pub mod redirects;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use messages::{Message, MessageSink, Severity};
pub use redirects::RedirectStore;

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
