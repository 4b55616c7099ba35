use std::hash::{Hash, Hasher};

use uuid::Uuid;

use super::values::{Author, Status, Title, Year};

/// A catalogued book.
///
/// Identity is the `oid` assigned at creation; two books are equal when their
/// oids match, whatever their other fields hold.
#[derive(Debug, Clone)]
pub struct Book {
    oid: String,
    title: Title,
    author: Author,
    year: Year,
    status: Status,
}

impl Book {
    /// New, available book with a fresh oid
    pub fn new(title: Title, author: Author, year: Year) -> Self {
        Self {
            oid: Uuid::new_v4().to_string(),
            title,
            author,
            year,
            status: Status::default(),
        }
    }

    /// Rebuild a book that already has an identity, e.g. from storage
    pub fn restore(
        oid: impl Into<String>,
        title: Title,
        author: Author,
        year: Year,
        status: Status,
    ) -> Self {
        Self {
            oid: oid.into(),
            title,
            author,
            year,
            status,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn oid(&self) -> &str {
        &self.oid
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn year(&self) -> &Year {
        &self.year
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Flip between available and checked out
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.oid.hash(state);
    }
}
