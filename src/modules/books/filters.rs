use super::models::Book;

/// Optional search criteria, combined with AND.
///
/// Title and author match as case-insensitive substrings, year as an exact
/// string and status exactly. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilters {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub status: Option<bool>,
}

impl BookFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_status(mut self, available: bool) -> Self {
        self.status = Some(available);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none() && self.status.is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        contains_ignore_case(self.title.as_deref(), book.title().as_str())
            && contains_ignore_case(self.author.as_deref(), book.author().as_str())
            && self
                .year
                .as_deref()
                .map_or(true, |year| book.year().as_str() == year)
            && self
                .status
                .map_or(true, |available| book.is_available() == available)
    }
}

fn contains_ignore_case(needle: Option<&str>, haystack: &str) -> bool {
    needle.map_or(true, |needle| {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::values::{Author, Status, Title, Year};

    fn alpha() -> Book {
        Book::new(
            Title::new("Alpha").unwrap(),
            Author::new("Bravo").unwrap(),
            Year::new("2020").unwrap(),
        )
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(BookFilters::new().is_empty());
        assert!(BookFilters::new().matches(&alpha()));
    }

    #[test]
    fn test_title_and_author_are_case_insensitive_substrings() {
        let book = alpha();
        assert!(BookFilters::new().with_title("alp").matches(&book));
        assert!(BookFilters::new().with_title("PHA").matches(&book));
        assert!(BookFilters::new().with_author("rav").matches(&book));
        assert!(!BookFilters::new().with_title("beta").matches(&book));
    }

    #[test]
    fn test_year_is_exact() {
        let book = alpha();
        assert!(BookFilters::new().with_year("2020").matches(&book));
        assert!(!BookFilters::new().with_year("2021").matches(&book));
        assert!(!BookFilters::new().with_year("202").matches(&book));
    }

    #[test]
    fn test_status_is_exact() {
        let book = alpha();
        assert!(BookFilters::new().with_status(true).matches(&book));
        assert!(!BookFilters::new().with_status(false).matches(&book));

        let checked_out = book.with_status(Status::CHECKED_OUT);
        assert!(BookFilters::new().with_status(false).matches(&checked_out));
    }

    #[test]
    fn test_fields_are_anded() {
        let book = alpha();
        let all = BookFilters::new()
            .with_title("Alpha")
            .with_author("Bravo")
            .with_year("2020");
        assert!(all.matches(&book));
        assert!(!all.with_status(false).matches(&book));
    }
}
