use std::fmt;

use thiserror::Error;

use crate::{book_state::BookState, events::BookEvent};

/// The two kinds of keyed entity held by a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A book, keyed by its ISBN
    Book,
    /// A member, keyed by its member ID
    Member,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Book => f.write_str("Book with ISBN"),
            Self::Member => f.write_str("Member with ID"),
        }
    }
}

/// Required input fields checked before a record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Book title
    Title,
    /// Book author
    Author,
    /// Book code
    Isbn,
    /// Member name
    Name,
    /// Member code
    MemberId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Title => "Book title",
            Self::Author => "Author name",
            Self::Isbn => "ISBN",
            Self::Name => "Member name",
            Self::MemberId => "Member ID",
        };
        f.write_str(label)
    }
}

/// Why an operation clashed with the current borrowing state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictReason {
    /// Removal of a book that is out on loan
    #[error("Cannot remove book {code}: it is currently borrowed")]
    BookBorrowed {
        /// Code of the borrowed book
        code: String,
    },
    /// Removal of a member that still holds books
    #[error("Cannot remove member {code}: they have {count} borrowed book(s)")]
    MemberHasLoans {
        /// Code of the member
        code: String,
        /// Number of books still held
        count: usize,
    },
    /// Borrowing a book somebody else already holds
    #[error("Book {code} is not available: it is currently borrowed")]
    BookUnavailable {
        /// Code of the unavailable book
        code: String,
    },
    /// Returning a book the member never borrowed
    #[error("Member {member} has not borrowed book {book}")]
    NotBorrowedByMember {
        /// Code of the book being returned
        book: String,
        /// Code of the member returning it
        member: String,
    },
    /// The book state machine has no edge for this event
    #[error("Cannot process event {event} from current state {from_state:?}")]
    InvalidTransition {
        /// State the book was in
        from_state: BookState,
        /// Event that was rejected
        event: BookEvent,
    },
}

/// Custom error type for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A required field was empty or whitespace only
    #[error("{field} cannot be empty")]
    Validation {
        /// The offending field
        field: Field,
    },
    /// The code is already registered
    #[error("{kind} {code} already exists")]
    DuplicateKey {
        /// Which collection rejected the code
        kind: EntityKind,
        /// The duplicated code
        code: String,
    },
    /// Nothing is registered under the code
    #[error("{kind} {code} not found")]
    NotFound {
        /// Which collection was searched
        kind: EntityKind,
        /// The code that was looked up
        code: String,
    },
    /// The operation clashes with the current borrowing state
    #[error(transparent)]
    Conflict(#[from] ConflictReason),
}

impl CatalogError {
    /// Shorthand for a missing book
    pub(crate) fn book_not_found(code: &str) -> Self {
        Self::NotFound { kind: EntityKind::Book, code: code.to_string() }
    }

    /// Shorthand for a missing member
    pub(crate) fn member_not_found(code: &str) -> Self {
        Self::NotFound { kind: EntityKind::Member, code: code.to_string() }
    }
}

/// Result alias used throughout the catalog
pub type Result<T> = std::result::Result<T, CatalogError>;
