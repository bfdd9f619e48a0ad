use std::{collections::HashMap, fmt};

use tracing::{debug, info};

use crate::{
    book::Book,
    error::{CatalogError, ConflictReason, EntityKind, Field, Result},
    history::{DEFAULT_HISTORY_LIMIT, History, StateTransition},
    listing::{Listing, Statistics},
    member::Member,
    observers::{StatusMessage, StatusObserver},
    snapshot::CatalogSnapshot,
};

/// Tunables for a catalog instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Trim member fields and reject blank ones, the same way books are checked
    pub strict_member_validation: bool,
    /// Maximum number of book transitions kept in the history
    pub history_limit: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self { strict_member_validation: false, history_limit: DEFAULT_HISTORY_LIMIT }
    }
}

/// In-memory catalog of books and members
///
/// The catalog is the only place where book availability changes. Books and
/// members are keyed by their code; a separate key list keeps insertion order
/// for listings.
pub struct Catalog {
    /// Books keyed by code
    books: HashMap<String, Book>,
    /// Book codes in insertion order
    book_order: Vec<String>,
    /// Members keyed by code
    members: HashMap<String, Member>,
    /// Member codes in insertion order
    member_order: Vec<String>,
    /// Record of book state changes
    history: History,
    /// Registered status observers
    observers: Vec<Box<dyn StatusObserver>>,
    /// Behaviour switches
    options: CatalogOptions,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.books)
            .field("book_order", &self.book_order)
            .field("members", &self.members)
            .field("member_order", &self.member_order)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim `value`, rejecting it when nothing is left
fn required(value: &str, field: Field) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation { field });
    }
    Ok(trimmed.to_string())
}

impl Catalog {
    /// Create an empty catalog with default options
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CatalogOptions::default())
    }

    /// Create an empty catalog with the given options
    #[must_use]
    pub fn with_options(options: CatalogOptions) -> Self {
        Self {
            books: HashMap::new(),
            book_order: Vec::new(),
            members: HashMap::new(),
            member_order: Vec::new(),
            history: History::new(options.history_limit),
            observers: Vec::new(),
            options,
        }
    }

    /// Options this catalog was built with
    #[must_use]
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Register an observer to be told about every mutation
    pub fn register_observer(&mut self, observer: Box<dyn StatusObserver>) {
        self.observers.push(observer);
    }

    /// Send a message to every observer
    fn notify(observers: &[Box<dyn StatusObserver>], message: &StatusMessage) {
        for observer in observers {
            observer.on_status(message);
        }
    }

    /// Report a successful operation
    fn succeed(&self, message: String) {
        Self::notify(&self.observers, &StatusMessage::Success(message));
    }

    /// Report a rejected operation and hand the error back
    fn reject(&self, error: CatalogError) -> CatalogError {
        debug!(%error, "operation rejected");
        Self::notify(&self.observers, &StatusMessage::Failure(error.to_string()));
        error
    }

    /// Keep a book transition and tell observers about it
    fn record(&mut self, transition: StateTransition) {
        for observer in &self.observers {
            observer.on_transition(&transition);
        }
        self.history.record(transition);
    }

    /// Add a new, available book
    ///
    /// All three fields are trimmed before they are stored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if a field is blank, or
    /// `CatalogError::DuplicateKey` if a book with the same code exists.
    pub fn add_book(&mut self, title: &str, author: &str, code: &str) -> Result<&Book> {
        let fields = required(title, Field::Title).and_then(|title| {
            Ok((title, required(author, Field::Author)?, required(code, Field::Isbn)?))
        });
        let (title, author, code) = fields.map_err(|e| self.reject(e))?;

        if self.books.contains_key(&code) {
            return Err(self.reject(CatalogError::DuplicateKey { kind: EntityKind::Book, code }));
        }

        info!(code = %code, title = %title, "adding book");
        self.succeed(format!("Book added successfully: {title}"));
        self.book_order.push(code.clone());
        let book = self.books.entry(code.clone()).or_insert_with(|| Book::new(title, author, code));
        Ok(&*book)
    }

    /// Remove a book that is not out on loan
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no book has this code, or
    /// `ConflictReason::BookBorrowed` if it is currently borrowed.
    pub fn remove_book(&mut self, code: &str) -> Result<Book> {
        match self.books.get(code) {
            None => return Err(self.reject(CatalogError::book_not_found(code))),
            Some(book) if !book.is_available() => {
                let reason = ConflictReason::BookBorrowed { code: code.to_string() };
                return Err(self.reject(reason.into()));
            }
            Some(_) => {}
        }

        let book = self.books.remove(code).ok_or_else(|| CatalogError::book_not_found(code))?;
        self.book_order.retain(|c| c != code);
        info!(code, "removed book");
        self.succeed(format!("Book removed successfully: {}", book.title()));
        Ok(book)
    }

    /// Look up a book by its exact code
    #[must_use]
    pub fn find_book_by_code(&self, code: &str) -> Option<&Book> {
        self.books.get(code)
    }

    /// Every book, in the order it was added
    #[must_use]
    pub fn list_all_books(&self) -> Listing<&Book> {
        self.book_order.iter().filter_map(|code| self.books.get(code)).collect()
    }

    /// Books that can be borrowed right now, in the order they were added
    #[must_use]
    pub fn list_available_books(&self) -> Listing<&Book> {
        self.book_order
            .iter()
            .filter_map(|code| self.books.get(code))
            .filter(|book| book.is_available())
            .collect()
    }

    /// Register a new member with no loans
    ///
    /// Blank names and codes are accepted unless
    /// `CatalogOptions::strict_member_validation` is set, in which case both
    /// fields are trimmed and checked like book fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateKey` if a member with the same code
    /// exists, or `CatalogError::Validation` for blank fields in strict mode.
    pub fn add_member(&mut self, name: &str, code: &str) -> Result<&Member> {
        let (name, code) = if self.options.strict_member_validation {
            let fields = required(name, Field::Name)
                .and_then(|name| Ok((name, required(code, Field::MemberId)?)));
            fields.map_err(|e| self.reject(e))?
        } else {
            (name.to_string(), code.to_string())
        };

        if self.members.contains_key(&code) {
            return Err(self.reject(CatalogError::DuplicateKey { kind: EntityKind::Member, code }));
        }

        info!(code = %code, name = %name, "adding member");
        self.succeed(format!("Member added successfully: {name}"));
        self.member_order.push(code.clone());
        let member = self.members.entry(code.clone()).or_insert_with(|| Member::new(name, code));
        Ok(&*member)
    }

    /// Remove a member that holds no books
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no member has this code, or
    /// `ConflictReason::MemberHasLoans` if they still hold books.
    pub fn remove_member(&mut self, code: &str) -> Result<Member> {
        match self.members.get(code) {
            None => return Err(self.reject(CatalogError::member_not_found(code))),
            Some(member) if member.borrowed_count() > 0 => {
                let reason = ConflictReason::MemberHasLoans {
                    code: code.to_string(),
                    count: member.borrowed_count(),
                };
                return Err(self.reject(reason.into()));
            }
            Some(_) => {}
        }

        let member =
            self.members.remove(code).ok_or_else(|| CatalogError::member_not_found(code))?;
        self.member_order.retain(|c| c != code);
        info!(code, "removed member");
        self.succeed(format!("Member removed successfully: {}", member.name()));
        Ok(member)
    }

    /// Look up a member by their exact code
    #[must_use]
    pub fn find_member_by_code(&self, code: &str) -> Option<&Member> {
        self.members.get(code)
    }

    /// Every member, in the order they registered
    #[must_use]
    pub fn list_all_members(&self) -> Listing<&Member> {
        self.member_order.iter().filter_map(|code| self.members.get(code)).collect()
    }

    /// Books held by a member, in the order they were borrowed
    ///
    /// Returns `None` if no member has this code.
    #[must_use]
    pub fn borrowed_books(&self, member_code: &str) -> Option<Vec<&Book>> {
        let member = self.members.get(member_code)?;
        Some(member.borrowed_codes().iter().filter_map(|code| self.books.get(code)).collect())
    }

    /// Resolve both sides of a loan and take the book out
    fn lend(&mut self, book_code: &str, member_code: &str) -> Result<(StateTransition, String)> {
        let book =
            self.books.get_mut(book_code).ok_or_else(|| CatalogError::book_not_found(book_code))?;
        let member = self
            .members
            .get_mut(member_code)
            .ok_or_else(|| CatalogError::member_not_found(member_code))?;

        let transition = member.borrow(book)?;
        let message =
            format!("Book '{}' borrowed successfully by {}", book.title(), member.name());
        Ok((transition, message))
    }

    /// Resolve both sides of a loan and bring the book back
    fn take_back(
        &mut self,
        book_code: &str,
        member_code: &str,
    ) -> Result<(StateTransition, String)> {
        let book =
            self.books.get_mut(book_code).ok_or_else(|| CatalogError::book_not_found(book_code))?;
        let member = self
            .members
            .get_mut(member_code)
            .ok_or_else(|| CatalogError::member_not_found(member_code))?;

        let transition = member.return_book(book)?;
        let message =
            format!("Book '{}' returned successfully by {}", book.title(), member.name());
        Ok((transition, message))
    }

    /// Lend a book to a member
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown book (checked first)
    /// or member, and `ConflictReason::BookUnavailable` if the book is
    /// already borrowed. No state changes on failure.
    pub fn borrow_book(&mut self, book_code: &str, member_code: &str) -> Result<()> {
        match self.lend(book_code, member_code) {
            Ok((transition, message)) => {
                self.record(transition);
                self.succeed(message);
                Ok(())
            }
            Err(error) => Err(self.reject(error)),
        }
    }

    /// Take a book back from the member who borrowed it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown book (checked first)
    /// or member, and `ConflictReason::NotBorrowedByMember` if this member
    /// does not hold the book. No state changes on failure.
    pub fn return_book(&mut self, book_code: &str, member_code: &str) -> Result<()> {
        match self.take_back(book_code, member_code) {
            Ok((transition, message)) => {
                self.record(transition);
                self.succeed(message);
                Ok(())
            }
            Err(error) => Err(self.reject(error)),
        }
    }

    /// Count books by availability, and members
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let available = self.books.values().filter(|book| book.is_available()).count();
        let borrowed = self.books.values().filter(|book| !book.is_available()).count();
        Statistics { total: self.books.len(), available, borrowed, members: self.members.len() }
    }

    /// Number of books in the catalog
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of registered members
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Book transitions recorded so far, oldest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Copy the current state into a serializable snapshot
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            books: self.list_all_books().into_items().into_iter().cloned().collect(),
            members: self.list_all_members().into_items().into_iter().cloned().collect(),
            statistics: self.statistics(),
        }
    }
}

// Include tests module
#[cfg(test)]
mod tests;
