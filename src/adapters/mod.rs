//! Port implementations.
//!
//! `live` talks to the real world; `memory` keeps everything in process and
//! is deterministic, for tests and for embedding the reconciler.

pub mod live;
pub mod memory;
