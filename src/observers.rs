use std::{cell::RefCell, fmt, rc::Rc};

use crate::{events::BookEvent, history::StateTransition};

/// Human-readable outcome of a mutating catalog operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// The operation went through
    Success(String),
    /// The operation was rejected, with the reason
    Failure(String),
}

impl StatusMessage {
    /// Whether this reports a successful operation
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The message text
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(text) => f.write_str(text),
            Self::Failure(text) => write!(f, "Error: {text}"),
        }
    }
}

/// Trait for observing catalog activity
pub trait StatusObserver {
    /// Called once for every mutating operation
    fn on_status(&self, message: &StatusMessage);

    /// Called when a book changes state
    fn on_transition(&self, _transition: &StateTransition) {}
}

/// Forwards all activity to `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn on_status(&self, message: &StatusMessage) {
        match message {
            StatusMessage::Success(text) => tracing::info!(status = "ok", "{text}"),
            StatusMessage::Failure(text) => tracing::warn!(status = "rejected", "{text}"),
        }
    }

    fn on_transition(&self, transition: &StateTransition) {
        let StateTransition { book_code, from, to, event } = transition;
        match event {
            BookEvent::Borrow(member) => {
                tracing::debug!(book = %book_code, %member, ?from, ?to, "book borrowed");
            }
            BookEvent::Return => {
                tracing::debug!(book = %book_code, ?from, ?to, "book returned");
            }
        }
    }
}

/// Collects status messages in memory
///
/// Clones share the same buffer, so a shell can keep one handle while the
/// catalog owns another.
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    /// Messages not yet drained
    messages: Rc<RefCell<Vec<StatusMessage>>>,
}

impl StatusLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every message recorded so far
    #[must_use]
    pub fn drain(&self) -> Vec<StatusMessage> {
        self.messages.take()
    }

    /// Number of messages waiting
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Whether no messages are waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl StatusObserver for StatusLog {
    fn on_status(&self, message: &StatusMessage) {
        self.messages.borrow_mut().push(message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_log_clones_share_buffer() {
        let log = StatusLog::new();
        let handle = log.clone();

        log.on_status(&StatusMessage::Success("Book added".to_string()));
        assert_eq!(handle.len(), 1);

        let drained = handle.drain();
        assert_eq!(drained, [StatusMessage::Success("Book added".to_string())]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_failure_display_is_prefixed() {
        let message = StatusMessage::Failure("Book with ISBN 1 not found".to_string());
        assert!(!message.is_success());
        assert_eq!(message.to_string(), "Error: Book with ISBN 1 not found");
        assert_eq!(message.text(), "Book with ISBN 1 not found");
    }
}
