//! Messenger that keeps every message for later inspection.

use std::sync::Mutex;

use crate::ports::{Message, MessageSink};

/// Collects emitted messages in order.
#[derive(Default)]
pub struct CollectingMessenger {
    messages: Mutex<Vec<Message>>,
}

impl CollectingMessenger {
    /// Creates an empty messenger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages emitted so far.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl MessageSink for CollectingMessenger {
    fn emit(&self, message: &Message) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.clone());
        }
    }
}
