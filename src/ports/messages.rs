//! Messaging port for notices shown to the acting user.

use std::fmt;

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Confirmation of something that happened.
    Status,
    /// A problem the user should act on.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => f.write_str("status"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Rendered text.
    pub text: String,
    /// Presentation severity.
    pub severity: Severity,
}

impl Message {
    /// A status-level message.
    #[must_use]
    pub fn status(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Status }
    }

    /// An error-level message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), severity: Severity::Error }
    }
}

/// Fire-and-forget notification channel.
///
/// Delivery is best effort; emitting never fails the caller.
pub trait MessageSink: Send + Sync {
    /// Shows `message` to the user.
    fn emit(&self, message: &Message);
}
