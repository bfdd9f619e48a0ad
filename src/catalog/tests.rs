#[cfg(test)]
use pretty_assertions::assert_eq;

use crate::{
    book_state::BookState,
    catalog::{Catalog, CatalogOptions},
    error::{CatalogError, ConflictReason, EntityKind, Field},
    events::BookEvent,
    listing::Statistics,
    observers::{StatusLog, StatusMessage},
};

/// Helper function to set up a catalog with one book and one member
fn setup_test_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    assert!(catalog.add_book("Dune", "Herbert", "111").is_ok());
    assert!(catalog.add_member("Ann", "M1").is_ok());
    catalog
}

/// A book is unavailable exactly when one member holds it
fn assert_availability_invariant(catalog: &Catalog) {
    let members = catalog.list_all_members();
    for book in &catalog.list_all_books() {
        let holders = members.iter().filter(|m| m.has_borrowed(book.code())).count();
        if book.is_available() {
            assert_eq!(holders, 0, "available book {} is held", book.code());
        } else {
            assert_eq!(holders, 1, "borrowed book {} has {holders} holders", book.code());
        }
    }
}

#[test]
fn test_add_then_find() {
    let catalog = setup_test_catalog();

    let book = catalog.find_book_by_code("111");
    assert!(
        matches!(book, Some(b) if b.title() == "Dune" && b.author() == "Herbert" && b.is_available())
    );
}

#[test]
fn test_add_book_trims_fields() {
    let mut catalog = Catalog::new();
    assert!(catalog.add_book("  Emma ", "\tAusten", " 222 ").is_ok());

    let book = catalog.find_book_by_code("222");
    assert!(matches!(book, Some(b) if b.title() == "Emma" && b.author() == "Austen"));
    assert!(catalog.find_book_by_code(" 222 ").is_none());
}

#[test]
fn test_add_book_rejects_blank_fields() {
    let mut catalog = Catalog::new();

    let cases = [
        (("", "Herbert", "111"), Field::Title),
        (("Dune", "   ", "111"), Field::Author),
        (("Dune", "Herbert", "\n"), Field::Isbn),
    ];
    for ((title, author, code), field) in cases {
        let result = catalog.add_book(title, author, code);
        assert_eq!(result.err(), Some(CatalogError::Validation { field }));
    }
    assert_eq!(catalog.book_count(), 0);
}

#[test]
fn test_duplicate_book_rejected_without_change() {
    let mut catalog = setup_test_catalog();

    let result = catalog.add_book("Other", "Someone", "111");
    assert_eq!(
        result.err(),
        Some(CatalogError::DuplicateKey { kind: EntityKind::Book, code: "111".to_string() })
    );

    // Rejecting twice is the same as rejecting once
    assert!(catalog.add_book("Other", "Someone", " 111").is_err());
    assert_eq!(catalog.book_count(), 1);
    assert!(matches!(catalog.find_book_by_code("111"), Some(b) if b.title() == "Dune"));
}

#[test]
fn test_lookup_is_exact_and_case_sensitive() {
    let mut catalog = Catalog::new();
    assert!(catalog.add_book("Dune", "Herbert", "abc").is_ok());

    assert!(catalog.find_book_by_code("ABC").is_none());
    assert!(catalog.find_book_by_code("ab").is_none());
    assert!(catalog.find_book_by_code("abc").is_some());
}

#[test]
fn test_listings_keep_insertion_order() {
    let mut catalog = Catalog::new();
    for (title, code) in [("C", "3"), ("A", "1"), ("B", "2")] {
        assert!(catalog.add_book(title, "Author", code).is_ok());
    }
    assert!(catalog.add_member("Ann", "M1").is_ok());
    assert!(catalog.borrow_book("1", "M1").is_ok());

    let all: Vec<&str> = catalog.list_all_books().iter().map(|b| b.code()).collect();
    assert_eq!(all, ["3", "1", "2"]);

    let available = catalog.list_available_books();
    assert_eq!(available.count(), 2);
    assert_eq!(available.items().len(), available.count());
    let codes: Vec<&str> = available.iter().map(|b| b.code()).collect();
    assert_eq!(codes, ["3", "2"]);
}

#[test]
fn test_empty_listings() {
    let catalog = Catalog::new();
    assert!(catalog.list_all_books().is_empty());
    assert!(catalog.list_available_books().is_empty());
    assert_eq!(catalog.list_all_members().count(), 0);
}

#[test]
fn test_borrow_scenario() {
    let mut catalog = setup_test_catalog();

    assert!(catalog.borrow_book("111", "M1").is_ok());
    assert!(matches!(catalog.find_book_by_code("111"), Some(b) if !b.is_available()));
    assert!(matches!(catalog.find_member_by_code("M1"), Some(m) if m.has_borrowed("111")));
    assert_availability_invariant(&catalog);

    let again = catalog.borrow_book("111", "M1");
    assert_eq!(
        again.err(),
        Some(CatalogError::Conflict(ConflictReason::BookUnavailable { code: "111".to_string() }))
    );

    assert!(catalog.return_book("111", "M1").is_ok());
    assert!(matches!(catalog.find_book_by_code("111"), Some(b) if b.is_available()));
    assert_availability_invariant(&catalog);

    assert!(catalog.remove_book("111").is_ok());
    assert!(catalog.find_book_by_code("111").is_none());
}

#[test]
fn test_borrow_by_second_member_changes_nothing() {
    let mut catalog = setup_test_catalog();
    assert!(catalog.add_member("Bob", "M2").is_ok());
    assert!(catalog.borrow_book("111", "M1").is_ok());

    assert!(catalog.borrow_book("111", "M2").is_err());

    assert_eq!(catalog.borrowed_books("M2").map(|books| books.len()), Some(0));
    assert!(
        matches!(catalog.find_book_by_code("111"), Some(b) if *b.state() == BookState::Borrowed("M1".to_string()))
    );
    assert_eq!(catalog.history().len(), 1);
    assert_availability_invariant(&catalog);
}

#[test]
fn test_not_found_reports_book_before_member() {
    let mut catalog = setup_test_catalog();

    let result = catalog.borrow_book("999", "nobody");
    assert_eq!(
        result.err(),
        Some(CatalogError::NotFound { kind: EntityKind::Book, code: "999".to_string() })
    );

    let result = catalog.return_book("111", "nobody");
    assert_eq!(
        result.err(),
        Some(CatalogError::NotFound { kind: EntityKind::Member, code: "nobody".to_string() })
    );
}

#[test]
fn test_return_of_book_not_borrowed_by_member() {
    let mut catalog = setup_test_catalog();
    assert!(catalog.add_member("Bob", "M2").is_ok());
    assert!(catalog.borrow_book("111", "M1").is_ok());

    let result = catalog.return_book("111", "M2");
    assert!(matches!(
        result,
        Err(CatalogError::Conflict(ConflictReason::NotBorrowedByMember { .. }))
    ));
    assert!(matches!(catalog.find_book_by_code("111"), Some(b) if !b.is_available()));

    // Once returned, the book is no longer on the member's list
    assert!(catalog.return_book("111", "M1").is_ok());
    assert!(catalog.return_book("111", "M1").is_err());
}

#[test]
fn test_remove_guards() {
    let mut catalog = setup_test_catalog();
    assert!(catalog.borrow_book("111", "M1").is_ok());

    let member = catalog.remove_member("M1");
    assert_eq!(
        member.err(),
        Some(CatalogError::Conflict(ConflictReason::MemberHasLoans {
            code: "M1".to_string(),
            count: 1
        }))
    );
    let book = catalog.remove_book("111");
    assert_eq!(
        book.err(),
        Some(CatalogError::Conflict(ConflictReason::BookBorrowed { code: "111".to_string() }))
    );

    assert!(catalog.return_book("111", "M1").is_ok());
    assert!(matches!(catalog.remove_member("M1"), Ok(m) if m.name() == "Ann"));
    assert!(catalog.find_member_by_code("M1").is_none());
    assert_eq!(catalog.list_all_members().count(), 0);
}

#[test]
fn test_remove_unknown() {
    let mut catalog = Catalog::new();
    assert!(matches!(catalog.remove_book("1"), Err(CatalogError::NotFound { .. })));
    assert!(matches!(catalog.remove_member("1"), Err(CatalogError::NotFound { .. })));
}

#[test]
fn test_add_member_is_lenient_by_default() {
    let mut catalog = Catalog::new();

    assert!(catalog.add_member("", " M1 ").is_ok());
    assert!(catalog.find_member_by_code(" M1 ").is_some());

    let duplicate = catalog.add_member("Ann", " M1 ");
    assert_eq!(
        duplicate.err(),
        Some(CatalogError::DuplicateKey { kind: EntityKind::Member, code: " M1 ".to_string() })
    );
}

#[test]
fn test_add_member_strict_validation() {
    let options = CatalogOptions { strict_member_validation: true, ..CatalogOptions::default() };
    let mut catalog = Catalog::with_options(options);

    assert_eq!(
        catalog.add_member("  ", "M1").err(),
        Some(CatalogError::Validation { field: Field::Name })
    );
    assert_eq!(
        catalog.add_member("Ann", "").err(),
        Some(CatalogError::Validation { field: Field::MemberId })
    );
    assert!(catalog.add_member(" Ann ", " M1 ").is_ok());
    assert!(matches!(catalog.find_member_by_code("M1"), Some(m) if m.name() == "Ann"));
}

#[test]
fn test_statistics() {
    let mut catalog = Catalog::new();
    for code in ["1", "2", "3", "4", "5"] {
        assert!(catalog.add_book("Title", "Author", code).is_ok());
    }
    assert!(catalog.add_member("Ann", "M1").is_ok());
    assert!(catalog.add_member("Bob", "M2").is_ok());
    assert!(catalog.borrow_book("1", "M1").is_ok());
    assert!(catalog.borrow_book("4", "M2").is_ok());

    let stats = catalog.statistics();
    assert_eq!(stats, Statistics { total: 5, available: 3, borrowed: 2, members: 2 });
    assert_eq!(stats.available.checked_add(stats.borrowed), Some(stats.total));
}

#[test]
fn test_borrowed_books_resolves_in_borrow_order() {
    let mut catalog = Catalog::new();
    assert!(catalog.add_book("First", "A", "1").is_ok());
    assert!(catalog.add_book("Second", "B", "2").is_ok());
    assert!(catalog.add_member("Ann", "M1").is_ok());
    assert!(catalog.borrow_book("2", "M1").is_ok());
    assert!(catalog.borrow_book("1", "M1").is_ok());

    let titles: Option<Vec<&str>> =
        catalog.borrowed_books("M1").map(|books| books.iter().map(|b| b.title()).collect());
    assert_eq!(titles, Some(vec!["Second", "First"]));
    assert!(catalog.borrowed_books("M9").is_none());
}

#[test]
fn test_history_tracking() {
    let mut catalog = setup_test_catalog();
    assert!(catalog.history().is_empty());

    assert!(catalog.borrow_book("111", "M1").is_ok());
    assert!(catalog.return_book("111", "M1").is_ok());
    assert!(catalog.return_book("111", "M1").is_err());

    let events: Vec<&BookEvent> = catalog.history().iter().map(|t| &t.event).collect();
    assert_eq!(events, [&BookEvent::Borrow("M1".to_string()), &BookEvent::Return]);

    let first = catalog.history().iter().next();
    assert!(matches!(first, Some(t) if t.book_code == "111" && t.from == BookState::Available));
}

#[test]
fn test_default_options() {
    let catalog = Catalog::new();
    assert_eq!(*catalog.options(), CatalogOptions::default());
    assert!(!catalog.options().strict_member_validation);
    assert_eq!(catalog.options().history_limit, 100);
}

#[test]
fn test_history_limit_from_options() {
    let options = CatalogOptions { history_limit: 1, ..CatalogOptions::default() };
    let mut catalog = Catalog::with_options(options.clone());
    assert_eq!(*catalog.options(), options);
    assert!(catalog.add_book("Dune", "Herbert", "111").is_ok());
    assert!(catalog.add_member("Ann", "M1").is_ok());

    assert!(catalog.borrow_book("111", "M1").is_ok());
    assert!(catalog.return_book("111", "M1").is_ok());

    assert_eq!(catalog.history().len(), 1);
    assert!(matches!(catalog.history().iter().next(), Some(t) if t.event == BookEvent::Return));
}

#[test]
fn test_every_mutation_reports_status() {
    let log = StatusLog::new();
    let mut catalog = Catalog::new();
    catalog.register_observer(Box::new(log.clone()));

    assert!(catalog.add_book("Dune", "Herbert", "111").is_ok());
    assert!(catalog.add_book("Dune", "Herbert", "111").is_err());
    assert!(catalog.add_member("Ann", "M1").is_ok());
    assert!(catalog.borrow_book("111", "M1").is_ok());
    assert!(catalog.remove_member("M1").is_err());
    assert!(catalog.return_book("111", "M1").is_ok());
    assert!(catalog.remove_book("111").is_ok());

    let messages = log.drain();
    assert_eq!(
        messages,
        vec![
            StatusMessage::Success("Book added successfully: Dune".to_string()),
            StatusMessage::Failure("Book with ISBN 111 already exists".to_string()),
            StatusMessage::Success("Member added successfully: Ann".to_string()),
            StatusMessage::Success("Book 'Dune' borrowed successfully by Ann".to_string()),
            StatusMessage::Failure(
                "Cannot remove member M1: they have 1 borrowed book(s)".to_string()
            ),
            StatusMessage::Success("Book 'Dune' returned successfully by Ann".to_string()),
            StatusMessage::Success("Book removed successfully: Dune".to_string()),
        ]
    );
}

#[test]
fn test_lookups_do_not_report() {
    let log = StatusLog::new();
    let mut catalog = setup_test_catalog();
    catalog.register_observer(Box::new(log.clone()));

    assert!(catalog.find_book_by_code("111").is_some());
    assert!(catalog.find_member_by_code("nobody").is_none());
    let _stats = catalog.statistics();
    assert!(log.is_empty());
}

#[test]
fn test_snapshot_serializes_current_state() {
    let mut catalog = setup_test_catalog();
    assert!(catalog.borrow_book("111", "M1").is_ok());

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.books.len(), 1);
    assert_eq!(snapshot.statistics.borrowed, 1);

    let json = snapshot.to_json();
    assert!(matches!(json, Ok(ref text) if text.contains("\"Borrowed\": \"M1\"")));
}
