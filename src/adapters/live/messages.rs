//! Terminal messenger: status notices on stdout, errors on stderr.

use crate::ports::{Message, MessageSink, Severity};

/// Prints messages for the person running the CLI.
pub struct TerminalMessenger;

impl TerminalMessenger {
    fn render(message: &Message) -> String {
        format!("[{}] {}", message.severity, message.text)
    }
}

impl MessageSink for TerminalMessenger {
    fn emit(&self, message: &Message) {
        match message.severity {
            Severity::Status => println!("{}", Self::render(message)),
            Severity::Error => eprintln!("{}", Self::render(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_prefixes_severity() {
        assert_eq!(
            TerminalMessenger::render(&Message::error("loop")),
            "[error] loop"
        );
        assert_eq!(
            TerminalMessenger::render(&Message::status("saved")),
            "[status] saved"
        );
    }
}
