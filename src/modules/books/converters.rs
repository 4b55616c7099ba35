//! Mapping between [`Book`] entities and their stored JSON documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::errors::ValueError;
use super::models::Book;
use super::values::{Author, Status, Title, Year};

/// Flat stored form of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDocument {
    pub oid: String,
    pub title: String,
    pub author: String,
    pub year: String,
    pub status: bool,
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        Self {
            oid: book.oid().to_string(),
            title: book.title().as_str().to_string(),
            author: book.author().as_str().to_string(),
            year: book.year().as_str().to_string(),
            status: book.is_available(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValueError),
}

// status stays untyped so a missing or non-boolean value gets the domain error
#[derive(Deserialize)]
struct StoredBook {
    oid: String,
    title: String,
    author: String,
    year: String,
    #[serde(default)]
    status: Value,
}

pub fn convert_book_to_document(book: &Book) -> Value {
    let document = BookDocument::from(book);
    serde_json::json!({
        "oid": document.oid,
        "title": document.title,
        "author": document.author,
        "year": document.year,
        "status": document.status,
    })
}

/// Decode a stored document, re-running value-object validation
pub fn convert_document_to_book(document: &Value) -> Result<Book, DocumentError> {
    let stored = StoredBook::deserialize(document)?;

    Ok(Book::restore(
        stored.oid,
        Title::new(stored.title)?,
        Author::new(stored.author)?,
        Year::new(stored.year)?,
        Status::from_json(Some(&stored.status))?,
    ))
}
