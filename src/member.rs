use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{
    book::Book,
    error::{ConflictReason, Result},
    events::BookEvent,
    history::StateTransition,
};

/// A registered library member
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Member {
    /// Display name
    name: String,
    /// Unique member code
    code: String,
    /// Codes of the books currently held, in borrow order
    borrowed: Vec<String>,
}

impl Member {
    /// Create a member with no loans
    pub(crate) fn new(name: String, code: String) -> Self {
        Self { name, code, borrowed: Vec::new() }
    }

    /// Member name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique member code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replace the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Codes of borrowed books in the order they were borrowed
    #[must_use]
    pub fn borrowed_codes(&self) -> &[String] {
        &self.borrowed
    }

    /// Number of books currently held
    #[must_use]
    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Whether this member currently holds the book with `code`
    #[must_use]
    pub fn has_borrowed(&self, code: &str) -> bool {
        self.borrowed.iter().any(|c| c == code)
    }

    /// Take `book` out on loan
    ///
    /// # Errors
    ///
    /// Returns `ConflictReason::BookUnavailable` if the book is already
    /// borrowed. Neither the member nor the book is modified in that case.
    pub(crate) fn borrow(&mut self, book: &mut Book) -> Result<StateTransition> {
        if !book.is_available() {
            return Err(ConflictReason::BookUnavailable { code: book.code().to_string() }.into());
        }
        let transition = book.apply(BookEvent::Borrow(self.code.clone()))?;
        self.borrowed.push(book.code().to_string());
        Ok(transition)
    }

    /// Give `book` back
    ///
    /// # Errors
    ///
    /// Returns `ConflictReason::NotBorrowedByMember` if this member does not
    /// hold the book. Nothing is modified in that case.
    pub(crate) fn return_book(&mut self, book: &mut Book) -> Result<StateTransition> {
        let Some(pos) = self.borrowed.iter().position(|c| c == book.code()) else {
            return Err(ConflictReason::NotBorrowedByMember {
                book: book.code().to_string(),
                member: self.code.clone(),
            }
            .into());
        };
        let transition = book.apply(BookEvent::Return)?;
        self.borrowed.remove(pos);
        Ok(transition)
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

/// One summary line. Borrowed titles need the catalog to resolve them, see
/// `report::members`.
impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member ID: {} | Name: {} | Books Borrowed: {}",
            self.code,
            self.name,
            self.borrowed.len()
        )
    }
}
