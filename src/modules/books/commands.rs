//! Book use cases as mediator commands, with one handler each.

use std::sync::Arc;

use shelf_kernel::{Command, CommandHandler};

use crate::error::AppError;

use super::filters::BookFilters;
use super::models::Book;
use super::repository::BooksRepository;
use super::values::{Author, Title, Year};

/// List every book
#[derive(Debug, Clone, Default)]
pub struct GetBooksCommand;

impl Command for GetBooksCommand {
    type Output = Vec<Book>;
    type Error = AppError;
}

/// Create a book from raw user input
#[derive(Debug, Clone)]
pub struct AddBookCommand {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl AddBookCommand {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
        }
    }
}

impl Command for AddBookCommand {
    type Output = Book;
    type Error = AppError;
}

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    pub oid: String,
}

impl DeleteBookCommand {
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }
}

impl Command for DeleteBookCommand {
    type Output = ();
    type Error = AppError;
}

/// Search by optional raw criteria
#[derive(Debug, Clone, Default)]
pub struct FindBookCommand {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub status: Option<bool>,
}

impl Command for FindBookCommand {
    type Output = Vec<Book>;
    type Error = AppError;
}

/// Flip a book between available and checked out
#[derive(Debug, Clone)]
pub struct UpdateBookStatusCommand {
    pub oid: String,
}

impl UpdateBookStatusCommand {
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }
}

impl Command for UpdateBookStatusCommand {
    type Output = Book;
    type Error = AppError;
}

pub struct GetBooksCommandHandler {
    book_repository: Arc<dyn BooksRepository>,
}

impl GetBooksCommandHandler {
    pub fn new(book_repository: Arc<dyn BooksRepository>) -> Self {
        Self { book_repository }
    }
}

impl CommandHandler<GetBooksCommand> for GetBooksCommandHandler {
    fn handle(&self, _command: &GetBooksCommand) -> Result<Vec<Book>, AppError> {
        Ok(self.book_repository.get_books(None)?)
    }
}

pub struct AddBookCommandHandler {
    book_repository: Arc<dyn BooksRepository>,
}

impl AddBookCommandHandler {
    pub fn new(book_repository: Arc<dyn BooksRepository>) -> Self {
        Self { book_repository }
    }
}

impl CommandHandler<AddBookCommand> for AddBookCommandHandler {
    fn handle(&self, command: &AddBookCommand) -> Result<Book, AppError> {
        let new_book = Book::new(
            Title::new(command.title.as_str())?,
            Author::new(command.author.as_str())?,
            Year::new(command.year.as_str())?,
        );

        self.book_repository.add_book(&new_book)?;
        tracing::info!(oid = new_book.oid(), "book added to catalog");

        Ok(new_book)
    }
}

pub struct DeleteBookCommandHandler {
    book_repository: Arc<dyn BooksRepository>,
}

impl DeleteBookCommandHandler {
    pub fn new(book_repository: Arc<dyn BooksRepository>) -> Self {
        Self { book_repository }
    }
}

impl CommandHandler<DeleteBookCommand> for DeleteBookCommandHandler {
    fn handle(&self, command: &DeleteBookCommand) -> Result<(), AppError> {
        self.book_repository.delete_book(&command.oid)?;
        tracing::info!(oid = %command.oid, "book removed from catalog");
        Ok(())
    }
}

pub struct FindBookCommandHandler {
    book_repository: Arc<dyn BooksRepository>,
}

impl FindBookCommandHandler {
    pub fn new(book_repository: Arc<dyn BooksRepository>) -> Self {
        Self { book_repository }
    }
}

impl CommandHandler<FindBookCommand> for FindBookCommandHandler {
    fn handle(&self, command: &FindBookCommand) -> Result<Vec<Book>, AppError> {
        let filters = BookFilters {
            title: command.title.clone(),
            author: command.author.clone(),
            year: command.year.clone(),
            status: command.status,
        };

        Ok(self.book_repository.get_books(Some(&filters))?)
    }
}

pub struct UpdateBookStatusCommandHandler {
    book_repository: Arc<dyn BooksRepository>,
}

impl UpdateBookStatusCommandHandler {
    pub fn new(book_repository: Arc<dyn BooksRepository>) -> Self {
        Self { book_repository }
    }
}

impl CommandHandler<UpdateBookStatusCommand> for UpdateBookStatusCommandHandler {
    fn handle(&self, command: &UpdateBookStatusCommand) -> Result<Book, AppError> {
        let mut book = self.book_repository.get_book_by_oid(&command.oid)?;
        book.toggle_status();

        self.book_repository.update_book(&book)?;
        tracing::info!(
            oid = book.oid(),
            available = book.is_available(),
            "book status toggled"
        );

        Ok(book)
    }
}
