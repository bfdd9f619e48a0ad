use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered view over catalog entries together with their count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    /// Entries in insertion order
    items: Vec<T>,
}

impl<T> Listing<T> {
    /// Wrap entries already in display order
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of entries
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in order
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consume the listing, keeping the entries
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> FromIterator<T> for Listing<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Listing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Headline numbers for a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Statistics {
    /// Every book in the catalog
    pub total: usize,
    /// Books on the shelf
    pub available: usize,
    /// Books out on loan
    pub borrowed: usize,
    /// Registered members
    pub members: usize,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Library Statistics ===")?;
        writeln!(f, "Total Books: {}", self.total)?;
        writeln!(f, "Available Books: {}", self.available)?;
        writeln!(f, "Borrowed Books: {}", self.borrowed)?;
        write!(f, "Total Members: {}", self.members)
    }
}
