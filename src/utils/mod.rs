//! Small helpers shared by the front-ends.

use crate::modules::books::Book;

/// Inputs that abandon a multi-step flow: Latin `x` or its Cyrillic look-alike `х`
const ABORT_INPUTS: &[&str] = &["x", "х"];

pub fn is_abort_input(value: &str) -> bool {
    ABORT_INPUTS.contains(&value)
}

/// Multi-line human-readable view of a book
pub fn render_book(book: &Book) -> String {
    format!(
        "ID: {}\nTitle: {}\nAuthor: {}\nYear: {}\nStatus: {}",
        book.oid(),
        book.title(),
        book.author(),
        book.year(),
        book.status()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::{Author, Status, Title, Year};

    #[test]
    fn test_abort_inputs() {
        assert!(is_abort_input("x"));
        assert!(is_abort_input("\u{0445}"));
        assert!(!is_abort_input("X"));
        assert!(!is_abort_input("xx"));
        assert!(!is_abort_input(""));
    }

    #[test]
    fn test_render_book() {
        let book = Book::restore(
            "oid-1",
            Title::new("Piranesi").unwrap(),
            Author::new("Susanna Clarke").unwrap(),
            Year::new("2020").unwrap(),
            Status::CHECKED_OUT,
        );
        assert_eq!(
            render_book(&book),
            "ID: oid-1\nTitle: Piranesi\nAuthor: Susanna Clarke\nYear: 2020\nStatus: Checked out"
        );
    }
}
