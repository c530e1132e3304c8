//! Live adapters backed by the system.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod messages;

pub use clock::SystemClock;
pub use filesystem::DiskFileSystem;
pub use id_gen::UuidGenerator;
pub use messages::TerminalMessenger;
