use std::fmt;

use serde::{Deserialize, Serialize};

/// Events that can cause a book state transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookEvent {
    /// A member borrows the book
    Borrow(String),
    /// The book comes back to the shelf
    Return,
}

impl fmt::Display for BookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrow(member) => write!(f, "borrow by {member}"),
            Self::Return => write!(f, "return"),
        }
    }
}
