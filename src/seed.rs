use std::fmt;

use tracing::{debug, warn};

use crate::catalog::Catalog;

/// Books loaded by `load_sample_data`: title, author, ISBN
pub const SAMPLE_BOOKS: [(&str, &str, &str); 5] = [
    ("The Great Gatsby", "F. Scott Fitzgerald", "978-0-7432-7356-5"),
    ("To Kill a Mockingbird", "Harper Lee", "978-0-06-112008-4"),
    ("1984", "George Orwell", "978-0-452-28423-4"),
    ("Pride and Prejudice", "Jane Austen", "978-0-14-143951-8"),
    ("The Catcher in the Rye", "J.D. Salinger", "978-0-316-76948-0"),
];

/// Members loaded by `load_sample_data`: name, member ID
pub const SAMPLE_MEMBERS: [(&str, &str); 3] =
    [("James Smith", "M001"), ("Jane Smith", "M002"), ("Bob Smith", "M003")];

/// How many sample records actually went in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Sample books added
    pub books: usize,
    /// Sample members added
    pub members: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} books, {} members", self.books, self.members)
    }
}

/// Fill a catalog with a handful of demo books and members
///
/// Each record is added on its own. One the catalog rejects, for example
/// because its code is already registered, is skipped and the rest still go in.
pub fn load_sample_data(catalog: &mut Catalog) -> SeedReport {
    let mut report = SeedReport::default();

    for (title, author, isbn) in SAMPLE_BOOKS {
        match catalog.add_book(title, author, isbn) {
            Ok(_) => report.books = report.books.saturating_add(1),
            Err(error) => warn!(%error, isbn, "skipping sample book"),
        }
    }
    for (name, id) in SAMPLE_MEMBERS {
        match catalog.add_member(name, id) {
            Ok(_) => report.members = report.members.saturating_add(1),
            Err(error) => warn!(%error, id, "skipping sample member"),
        }
    }

    debug!(books = report.books, members = report.members, "sample data loaded");
    report
}
