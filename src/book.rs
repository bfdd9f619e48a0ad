use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{
    book_state::BookState,
    error::{ConflictReason, Result},
    events::BookEvent,
    history::StateTransition,
};

/// A book in the catalog, identified by its code
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Book {
    /// Title as entered, trimmed
    title: String,
    /// Author as entered, trimmed
    author: String,
    /// Unique code (ISBN)
    code: String,
    /// Current lending state
    state: BookState,
}

impl Book {
    /// Create an available book. Callers validate the fields first.
    pub(crate) fn new(title: String, author: String, code: String) -> Self {
        Self { title, author, code, state: BookState::Available }
    }

    /// Book title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Book author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Unique code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Current lending state
    #[must_use]
    pub fn state(&self) -> &BookState {
        &self.state
    }

    /// Whether the book can be borrowed right now
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// Replace the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the author
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// Apply a lending event to the book
    ///
    /// # Errors
    ///
    /// Returns `ConflictReason::InvalidTransition` if the event is not valid
    /// from the current state; the book is left unchanged.
    pub(crate) fn apply(&mut self, event: BookEvent) -> Result<StateTransition> {
        let next = match (&self.state, &event) {
            (BookState::Available, BookEvent::Borrow(member)) => {
                Some(BookState::Borrowed(member.clone()))
            }
            (BookState::Borrowed(_), BookEvent::Return) => Some(BookState::Available),
            _ => None,
        };
        let Some(next) = next else {
            let reason = ConflictReason::InvalidTransition { from_state: self.state.clone(), event };
            return Err(reason.into());
        };

        let from = std::mem::replace(&mut self.state, next);
        Ok(StateTransition { book_code: self.code.clone(), from, to: self.state.clone(), event })
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {} | Author: {} | ISBN: {} | Status: {}",
            self.title,
            self.author,
            self.code,
            self.state.label()
        )
    }
}
