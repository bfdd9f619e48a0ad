use serde::{Deserialize, Serialize};

/// Represents the possible states of a catalog book
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookState {
    /// Book is on the shelf and can be borrowed
    #[default]
    Available,
    /// Book is held by the member with the given code
    Borrowed(String),
}

impl BookState {
    /// Whether the book can currently be borrowed
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Code of the member holding the book, if any
    #[must_use]
    pub fn holder(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::Borrowed(member) => Some(member),
        }
    }

    /// Short status label used in listings
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Borrowed(_) => "Borrowed",
        }
    }
}
