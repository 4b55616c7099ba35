use std::fmt;

use thiserror::Error;

/// Book attribute a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Year,
    Status,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Year => "year",
            Field::Status => "status",
        };
        f.write_str(name)
    }
}

/// Rejected input for a book value object
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("{field} must not be empty")]
    Empty { field: Field },

    #[error("{field} must be at least {min} characters long: \"{value}\"")]
    TooShort {
        field: Field,
        value: String,
        min: usize,
    },

    #[error("{field} must be at most {max} characters long: \"{value}\"")]
    TooLong {
        field: Field,
        value: String,
        max: usize,
    },

    #[error("year must be numeric: \"{value}\"")]
    NotNumeric { value: String },

    #[error("year must be less than or equal to the current year: \"{value}\"")]
    MoreThanCurrentYear { value: String },

    #[error("year must have four digits: \"{value}\"")]
    MustBeFourDigits { value: String },

    #[error("status must be boolean: {value}")]
    MustBeBoolean { value: String },
}

impl ValueError {
    pub fn field(&self) -> Field {
        match self {
            ValueError::Empty { field }
            | ValueError::TooShort { field, .. }
            | ValueError::TooLong { field, .. } => *field,
            ValueError::NotNumeric { .. }
            | ValueError::MoreThanCurrentYear { .. }
            | ValueError::MustBeFourDigits { .. } => Field::Year,
            ValueError::MustBeBoolean { .. } => Field::Status,
        }
    }
}
