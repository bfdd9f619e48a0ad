use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{book_state::BookState, events::BookEvent};

/// Default number of transitions a catalog remembers
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Represents a state transition of one book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StateTransition {
    /// Code of the book that changed state
    pub book_code: String,
    /// The state before the transition
    pub from: BookState,
    /// The state after the transition
    pub to: BookState,
    /// The event that triggered the transition
    pub event: BookEvent,
}

/// Bounded record of transitions, oldest first
#[derive(Debug, Clone)]
pub struct History {
    /// Recorded transitions
    entries: VecDeque<StateTransition>,
    /// Maximum number of entries to keep
    limit: usize,
}

impl History {
    /// Create an empty history holding at most `limit` entries
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)), limit }
    }

    /// Append a transition, dropping the oldest one when full
    pub fn record(&mut self, transition: StateTransition) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(transition);
    }

    /// Iterate over the recorded transitions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &StateTransition> {
        self.entries.iter()
    }

    /// Number of recorded transitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a StateTransition;
    type IntoIter = std::collections::vec_deque::Iter<'a, StateTransition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
