//! Interactive menu over a [`Catalog`].
//!
//! The shell reads menu choices and field values line by line, calls into
//! the catalog, and prints whatever status messages the catalog emitted.
//! Input and output are generic so the loop can be driven from memory.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    catalog::Catalog,
    observers::{StatusLog, StatusMessage, StatusObserver},
    report::{self, BookView},
};

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Register a new book
    AddBook,
    /// Delete a book that is on the shelf
    RemoveBook,
    /// Show every book
    ListBooks,
    /// Show books that can be borrowed
    ListAvailable,
    /// Register a new member
    AddMember,
    /// Delete a member without loans
    RemoveMember,
    /// Show every member
    ListMembers,
    /// Lend a book
    Borrow,
    /// Take a book back
    Return,
    /// Show counts
    Statistics,
    /// Print the catalog as JSON
    Export,
    /// Leave the shell
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = match s.trim() {
            "1" => Self::AddBook,
            "2" => Self::RemoveBook,
            "3" => Self::ListBooks,
            "4" => Self::ListAvailable,
            "5" => Self::AddMember,
            "6" => Self::RemoveMember,
            "7" => Self::ListMembers,
            "8" => Self::Borrow,
            "9" => Self::Return,
            "10" => Self::Statistics,
            "11" => Self::Export,
            "0" => Self::Exit,
            other => return Err(other.to_string()),
        };
        Ok(choice)
    }
}

/// Text of the main menu
const MENU: &str = "\
========== MAIN MENU ==========
1.  Add Book
2.  Remove Book
3.  Display All Books
4.  Display Available Books
5.  Add Member
6.  Remove Member
7.  Display All Members
8.  Borrow Book
9.  Return Book
10. Display Statistics
11. Export Catalog (JSON)
0.  Exit
================================";

/// Banner printed once at start-up
const BANNER: &str = "\
========================================
   Library Management System
========================================";

/// Line-oriented menu loop over a catalog
#[derive(Debug)]
pub struct Shell<R, W> {
    /// The catalog being managed
    catalog: Catalog,
    /// Status messages emitted by the catalog, waiting to be printed
    log: StatusLog,
    /// Where choices and fields are read from
    input: R,
    /// Where everything is printed
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Wrap a catalog, subscribing to its status messages
    #[must_use]
    pub fn new(mut catalog: Catalog, input: R, output: W) -> Self {
        let log = StatusLog::new();
        catalog.register_observer(Box::new(log.clone()));
        Self { catalog, log, input, output }
    }

    /// The catalog being managed
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The catalog being managed, for setup before `run`
    ///
    /// Status messages from changes made here are printed when `run` starts.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Queue a line to be printed with the next batch of status messages
    pub fn notice(&self, text: impl Into<String>) {
        self.log.on_status(&StatusMessage::Success(text.into()));
    }

    /// Stop the shell and hand the catalog back
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Run until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails, or if the
    /// catalog cannot be rendered as JSON.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;
        self.flush_status()?;

        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                debug!("input closed, leaving shell");
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(choice) => {
                    if !self.dispatch(choice)? {
                        break;
                    }
                }
                Err(other) => {
                    debug!(choice = %other, "unrecognised menu choice");
                    writeln!(self.output, "Invalid choice! Please try again.")?;
                }
            }
        }

        self.output.flush().context("failed to flush output")
    }

    /// Carry out one menu entry; `false` ends the loop
    fn dispatch(&mut self, choice: MenuChoice) -> Result<bool> {
        match choice {
            MenuChoice::AddBook => {
                writeln!(self.output, "\n--- Add New Book ---")?;
                let Some(fields) =
                    self.prompt_all(&["Enter book title: ", "Enter author name: ", "Enter ISBN: "])?
                else {
                    return Ok(false);
                };
                if let [title, author, isbn] = fields.as_slice() {
                    if fields.iter().any(String::is_empty) {
                        writeln!(self.output, "Error: All fields are required!")?;
                    } else {
                        drop(self.catalog.add_book(title, author, isbn));
                    }
                }
            }
            MenuChoice::RemoveBook => {
                writeln!(self.output, "\n--- Remove Book ---")?;
                let Some(isbn) = self.prompt("Enter ISBN of the book to remove: ")? else {
                    return Ok(false);
                };
                if isbn.is_empty() {
                    writeln!(self.output, "Error: ISBN is required!")?;
                } else {
                    drop(self.catalog.remove_book(&isbn));
                }
            }
            MenuChoice::ListBooks => {
                let text = report::books(&self.catalog.list_all_books(), BookView::All);
                writeln!(self.output, "{text}")?;
            }
            MenuChoice::ListAvailable => {
                let text =
                    report::books(&self.catalog.list_available_books(), BookView::Available);
                writeln!(self.output, "{text}")?;
            }
            MenuChoice::AddMember => {
                writeln!(self.output, "\n--- Add New Member ---")?;
                let Some(fields) = self.prompt_all(&["Enter member name: ", "Enter member ID: "])?
                else {
                    return Ok(false);
                };
                if let [name, id] = fields.as_slice() {
                    if fields.iter().any(String::is_empty) {
                        writeln!(self.output, "Error: All fields are required!")?;
                    } else {
                        drop(self.catalog.add_member(name, id));
                    }
                }
            }
            MenuChoice::RemoveMember => {
                writeln!(self.output, "\n--- Remove Member ---")?;
                let Some(id) = self.prompt("Enter member ID to remove: ")? else {
                    return Ok(false);
                };
                if id.is_empty() {
                    writeln!(self.output, "Error: Member ID is required!")?;
                } else {
                    drop(self.catalog.remove_member(&id));
                }
            }
            MenuChoice::ListMembers => {
                let text = report::members(&self.catalog);
                writeln!(self.output, "{text}")?;
            }
            MenuChoice::Borrow | MenuChoice::Return => return self.loan_form(choice),
            MenuChoice::Statistics => {
                writeln!(self.output, "{}", self.catalog.statistics())?;
            }
            MenuChoice::Export => {
                let json = self
                    .catalog
                    .snapshot()
                    .to_json()
                    .context("failed to serialize catalog snapshot")?;
                writeln!(self.output, "{json}")?;
            }
            MenuChoice::Exit => {
                writeln!(self.output, "Thank you for using Library Management System. Goodbye!")?;
                return Ok(false);
            }
        }

        self.flush_status()?;
        Ok(true)
    }

    /// Ask for a book and a member, then lend or take back the book
    fn loan_form(&mut self, choice: MenuChoice) -> Result<bool> {
        let heading = if choice == MenuChoice::Borrow { "Borrow Book" } else { "Return Book" };
        writeln!(self.output, "\n--- {heading} ---")?;
        let Some(fields) = self.prompt_all(&["Enter ISBN of the book: ", "Enter member ID: "])?
        else {
            return Ok(false);
        };

        if let [isbn, id] = fields.as_slice() {
            if isbn.is_empty() || id.is_empty() {
                writeln!(self.output, "Error: Both ISBN and Member ID are required!")?;
            } else if choice == MenuChoice::Borrow {
                drop(self.catalog.borrow_book(isbn, id));
            } else {
                drop(self.catalog.return_book(isbn, id));
            }
        }

        self.flush_status()?;
        Ok(true)
    }

    /// Print and clear any status messages from the catalog
    fn flush_status(&mut self) -> Result<()> {
        for message in self.log.drain() {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush().context("failed to flush output")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for several fields in turn; `None` if input ends before all are read
    fn prompt_all(&mut self, labels: &[&str]) -> Result<Option<Vec<String>>> {
        let mut values = Vec::with_capacity(labels.len());
        for label in labels {
            let Some(value) = self.prompt(label)? else {
                return Ok(None);
            };
            values.push(value);
        }
        Ok(Some(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::AddBook));
        assert_eq!(" 10 ".parse::<MenuChoice>(), Ok(MenuChoice::Statistics));
        assert_eq!("0".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!("12".parse::<MenuChoice>(), Err("12".to_string()));
        assert_eq!("abc".parse::<MenuChoice>(), Err("abc".to_string()));
    }
}
