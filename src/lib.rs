//! In-memory library catalog for tracking books, members and loans.
//!
//! A [`Catalog`] owns every book and member and is the only place where a
//! book's availability changes. Each mutating operation returns an explicit
//! [`Result`](error::Result) and also emits a human-readable
//! [`StatusMessage`] to registered observers.

pub mod book;
pub mod book_state;
pub mod catalog;
pub mod error;
pub mod events;
pub mod history;
pub mod listing;
pub mod member;
pub mod observers;
pub mod report;
pub mod seed;
pub mod shell;
pub mod snapshot;

pub use book::Book;
pub use book_state::BookState;
pub use catalog::{Catalog, CatalogOptions};
pub use error::{CatalogError, ConflictReason};
pub use events::BookEvent;
pub use listing::{Listing, Statistics};
pub use member::Member;
pub use observers::{StatusLog, StatusMessage, StatusObserver};
pub use shell::Shell;
