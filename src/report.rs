//! Text rendering of catalog listings for the interactive shell.

use crate::{book::Book, catalog::Catalog, listing::Listing};

/// Which set of books a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookView {
    /// Every book in the catalog
    All,
    /// Only books that can be borrowed
    Available,
}

impl BookView {
    /// Line printed when the listing is empty
    fn empty_line(self) -> &'static str {
        match self {
            Self::All => "No books in the library.",
            Self::Available => "No available books in the library.",
        }
    }

    /// Heading printed above a non-empty listing
    fn heading(self) -> &'static str {
        match self {
            Self::All => "=== All Books in Library ===",
            Self::Available => "=== Available Books ===",
        }
    }

    /// Label for the closing count line
    fn total_label(self) -> &'static str {
        match self {
            Self::All => "Total books",
            Self::Available => "Total available",
        }
    }
}

/// Render a numbered book listing
#[must_use]
pub fn books(listing: &Listing<&Book>, view: BookView) -> String {
    if listing.is_empty() {
        return view.empty_line().to_string();
    }

    let mut lines = vec![view.heading().to_string()];
    lines.extend((1_usize..).zip(listing).map(|(number, book)| format!("{number}. {book}")));
    lines.push(format!("{}: {}", view.total_label(), listing.count()));
    lines.join("\n")
}

/// Render every member with the titles of the books they hold
#[must_use]
pub fn members(catalog: &Catalog) -> String {
    let listing = catalog.list_all_members();
    if listing.is_empty() {
        return "No members registered in the library.".to_string();
    }

    let mut lines = vec!["=== All Library Members ===".to_string()];
    for (number, member) in (1_usize..).zip(&listing) {
        lines.push(format!("{number}. {member}"));
        let titles = catalog.borrowed_books(member.code()).unwrap_or_default();
        if !titles.is_empty() {
            lines.push("  Borrowed Books:".to_string());
            lines.extend(titles.iter().map(|book| format!("    - {}", book.title())));
        }
    }
    lines.push(format!("Total members: {}", listing.count()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_states() {
        let catalog = Catalog::new();
        assert_eq!(books(&catalog.list_all_books(), BookView::All), "No books in the library.");
        assert_eq!(
            books(&catalog.list_available_books(), BookView::Available),
            "No available books in the library."
        );
        assert_eq!(members(&catalog), "No members registered in the library.");
    }

    #[test]
    fn test_members_show_borrowed_titles() {
        let mut catalog = Catalog::new();
        assert!(catalog.add_book("Dune", "Herbert", "111").is_ok());
        assert!(catalog.add_member("Ann", "M1").is_ok());
        assert!(catalog.add_member("Bob", "M2").is_ok());
        assert!(catalog.borrow_book("111", "M1").is_ok());

        let text = members(&catalog);
        assert_eq!(
            text,
            "=== All Library Members ===\n\
             1. Member ID: M1 | Name: Ann | Books Borrowed: 1\n  Borrowed Books:\n    - Dune\n\
             2. Member ID: M2 | Name: Bob | Books Borrowed: 0\n\
             Total members: 2"
        );
    }

    #[test]
    fn test_available_view_hides_borrowed() {
        let mut catalog = Catalog::new();
        assert!(catalog.add_book("Dune", "Herbert", "111").is_ok());
        assert!(catalog.add_book("Emma", "Austen", "222").is_ok());
        assert!(catalog.add_member("Ann", "M1").is_ok());
        assert!(catalog.borrow_book("111", "M1").is_ok());

        let text = books(&catalog.list_available_books(), BookView::Available);
        assert_eq!(
            text,
            "=== Available Books ===\n\
             1. Title: Emma | Author: Austen | ISBN: 222 | Status: Available\n\
             Total available: 1"
        );
    }
}
