use std::path::PathBuf;

use shelf_db::{JsonDocumentStore, StoreError};
use thiserror::Error;

use super::converters::{convert_book_to_document, convert_document_to_book, DocumentError};
use super::filters::BookFilters;
use super::models::Book;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("book with oid \"{0}\" not found")]
    NotFound(String),

    #[error("stored book \"{oid}\" is invalid: {source}")]
    InvalidDocument {
        oid: String,
        #[source]
        source: DocumentError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence boundary over the book collection
pub trait BooksRepository: Send + Sync {
    /// Every stored book in storage order, optionally narrowed by `filters`
    fn get_books(&self, filters: Option<&BookFilters>) -> RepositoryResult<Vec<Book>>;

    /// Insert or overwrite the book under its oid
    fn add_book(&self, book: &Book) -> RepositoryResult<()>;

    fn update_book(&self, book: &Book) -> RepositoryResult<()>;

    fn delete_book(&self, oid: &str) -> RepositoryResult<()>;

    fn get_book_by_oid(&self, oid: &str) -> RepositoryResult<Book>;

    /// Remove every book
    fn clear(&self) -> RepositoryResult<()>;
}

/// Books kept in a single JSON file keyed by oid
#[derive(Debug, Clone)]
pub struct JsonBooksRepository {
    store: JsonDocumentStore,
}

impl JsonBooksRepository {
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let store = JsonDocumentStore::open(path)?;
        tracing::debug!(path = %store.path().display(), "books repository opened");
        Ok(Self { store })
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }
}

fn decode(oid: &str, document: &serde_json::Value) -> RepositoryResult<Book> {
    convert_document_to_book(document).map_err(|source| RepositoryError::InvalidDocument {
        oid: oid.to_string(),
        source,
    })
}

impl BooksRepository for JsonBooksRepository {
    fn get_books(&self, filters: Option<&BookFilters>) -> RepositoryResult<Vec<Book>> {
        let documents = self.store.load()?;

        let mut books = Vec::with_capacity(documents.len());
        for (oid, document) in &documents {
            let book = decode(oid, document)?;
            if filters.map_or(true, |filters| filters.matches(&book)) {
                books.push(book);
            }
        }

        tracing::debug!(
            total = documents.len(),
            matched = books.len(),
            filtered = filters.is_some_and(|f| !f.is_empty()),
            "listed books"
        );
        Ok(books)
    }

    fn add_book(&self, book: &Book) -> RepositoryResult<()> {
        let mut documents = self.store.load()?;
        documents.insert(book.oid().to_string(), convert_book_to_document(book));
        self.store.save(&documents)?;

        tracing::debug!(oid = book.oid(), "book added");
        Ok(())
    }

    fn update_book(&self, book: &Book) -> RepositoryResult<()> {
        let mut documents = self.store.load()?;

        let slot = documents
            .get_mut(book.oid())
            .ok_or_else(|| RepositoryError::NotFound(book.oid().to_string()))?;
        *slot = convert_book_to_document(book);
        self.store.save(&documents)?;

        tracing::debug!(oid = book.oid(), "book updated");
        Ok(())
    }

    fn delete_book(&self, oid: &str) -> RepositoryResult<()> {
        let mut documents = self.store.load()?;

        // shift_remove keeps the remaining documents in insertion order
        if documents.shift_remove(oid).is_none() {
            return Err(RepositoryError::NotFound(oid.to_string()));
        }
        self.store.save(&documents)?;

        tracing::debug!(oid, "book deleted");
        Ok(())
    }

    fn get_book_by_oid(&self, oid: &str) -> RepositoryResult<Book> {
        let documents = self.store.load()?;

        let document = documents
            .get(oid)
            .ok_or_else(|| RepositoryError::NotFound(oid.to_string()))?;
        decode(oid, document)
    }

    fn clear(&self) -> RepositoryResult<()> {
        self.store.clear()?;
        tracing::debug!(path = %self.store.path().display(), "books cleared");
        Ok(())
    }
}
