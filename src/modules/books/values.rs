//! Self-validating wrappers around the primitive book attributes.
//!
//! Each type is checked once at construction and is immutable afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::Datelike;
use serde_json::Value;

use super::errors::{Field, ValueError};

pub const MIN_TEXT_LEN: usize = 3;
pub const MAX_TEXT_LEN: usize = 100;
pub const YEAR_DIGITS: usize = 4;

fn validate_text(field: Field, value: &str) -> Result<(), ValueError> {
    if value.is_empty() {
        return Err(ValueError::Empty { field });
    }

    let len = value.chars().count();
    if len < MIN_TEXT_LEN {
        return Err(ValueError::TooShort {
            field,
            value: value.to_string(),
            min: MIN_TEXT_LEN,
        });
    }
    if len > MAX_TEXT_LEN {
        return Err(ValueError::TooLong {
            field,
            value: value.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        validate_text(Field::Title, &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Author(String);

impl Author {
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        validate_text(Field::Author, &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication year, four ASCII digits no later than the current year.
///
/// Compared and hashed by numeric value.
#[derive(Debug, Clone)]
pub struct Year {
    raw: String,
    number: u32,
}

impl Year {
    /// Validate against the local calendar year at the time of the call
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        Self::parse_at(value, chrono::Local::now().year())
    }

    /// Validate against an explicit current year.
    ///
    /// Checks run empty, numeric, range, digit count; the first failure wins.
    pub fn parse_at(value: impl Into<String>, current_year: i32) -> Result<Self, ValueError> {
        let raw = value.into();

        if raw.is_empty() {
            return Err(ValueError::Empty { field: Field::Year });
        }

        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValueError::NotNumeric { value: raw });
        }

        // too many digits to fit is necessarily in the future
        let number = match raw.parse::<u32>() {
            Ok(number) if i64::from(number) <= i64::from(current_year) => number,
            _ => return Err(ValueError::MoreThanCurrentYear { value: raw }),
        };

        if raw.len() != YEAR_DIGITS {
            return Err(ValueError::MustBeFourDigits { value: raw });
        }

        Ok(Self { raw, number })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Year {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Year {}

impl Hash for Year {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl PartialOrd for Year {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Year {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Availability flag: `true` available, `false` checked out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(bool);

impl Status {
    pub const AVAILABLE: Status = Status(true);
    pub const CHECKED_OUT: Status = Status(false);

    pub fn new(available: bool) -> Self {
        Self(available)
    }

    /// Decode a stored status, which must be present and boolean
    pub fn from_json(value: Option<&Value>) -> Result<Self, ValueError> {
        match value {
            None | Some(Value::Null) => Err(ValueError::Empty {
                field: Field::Status,
            }),
            Some(Value::Bool(available)) => Ok(Self(*available)),
            Some(other) => Err(ValueError::MustBeBoolean {
                value: other.to_string(),
            }),
        }
    }

    pub fn is_available(self) -> bool {
        self.0
    }

    pub fn toggled(self) -> Self {
        Self(!self.0)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::AVAILABLE
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "Available" } else { "Checked out" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn current_year() -> i32 {
        chrono::Local::now().year()
    }

    #[test]
    fn test_text_values_accept_valid_lengths() {
        let longest = "x".repeat(MAX_TEXT_LEN);
        for value in ["abc", "Война и мир", longest.as_str()] {
            assert_eq!(Title::new(value).unwrap().as_str(), value);
            assert_eq!(Author::new(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_title_rejects_bad_lengths() {
        assert_eq!(
            Title::new("").unwrap_err(),
            ValueError::Empty { field: Field::Title }
        );
        assert!(matches!(
            Title::new("ab").unwrap_err(),
            ValueError::TooShort { field: Field::Title, .. }
        ));
        assert!(matches!(
            Title::new("a".repeat(101)).unwrap_err(),
            ValueError::TooLong { field: Field::Title, .. }
        ));
    }

    #[test]
    fn test_author_rejects_bad_lengths() {
        assert_eq!(
            Author::new("").unwrap_err(),
            ValueError::Empty { field: Field::Author }
        );
        assert!(matches!(
            Author::new("J").unwrap_err(),
            ValueError::TooShort { field: Field::Author, .. }
        ));
        assert!(matches!(
            Author::new("a".repeat(150)).unwrap_err(),
            ValueError::TooLong { field: Field::Author, .. }
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // two Cyrillic letters are four bytes
        assert!(matches!(
            Title::new("Ая").unwrap_err(),
            ValueError::TooShort { .. }
        ));
        assert!(Title::new("я".repeat(100)).is_ok());
    }

    #[test]
    fn test_year_accepts_four_digit_past_years() {
        let year = Year::new("2020").unwrap();
        assert_eq!(year.as_str(), "2020");
        assert_eq!(year, Year::parse_at("2020", 2024).unwrap());
        assert!(Year::new(current_year().to_string()).is_ok());
        assert!(Year::new("0999").is_ok());
    }

    #[test]
    fn test_year_failures() {
        assert_eq!(Year::new("").unwrap_err(), ValueError::Empty { field: Field::Year });
        assert!(matches!(Year::new("2020a").unwrap_err(), ValueError::NotNumeric { .. }));
        assert!(matches!(Year::new("-202").unwrap_err(), ValueError::NotNumeric { .. }));
        assert!(matches!(Year::new("202").unwrap_err(), ValueError::MustBeFourDigits { .. }));
        assert!(matches!(
            Year::new((current_year() + 1).to_string()).unwrap_err(),
            ValueError::MoreThanCurrentYear { .. }
        ));
    }

    #[test]
    fn test_year_range_is_checked_before_digit_count() {
        assert!(matches!(
            Year::parse_at("12345", 2024).unwrap_err(),
            ValueError::MoreThanCurrentYear { .. }
        ));
        assert!(matches!(
            Year::parse_at("99999999999999999999999", 2024).unwrap_err(),
            ValueError::MoreThanCurrentYear { .. }
        ));
        assert!(matches!(
            Year::parse_at("00123", 2024).unwrap_err(),
            ValueError::MustBeFourDigits { .. }
        ));
    }

    #[test]
    fn test_year_uses_given_clock() {
        assert!(Year::parse_at("2030", 2030).is_ok());
        assert!(Year::parse_at("2030", 2029).is_err());
    }

    #[test]
    fn test_year_ordering_is_numeric() {
        let older = Year::new("1999").unwrap();
        let newer = Year::new("2001").unwrap();
        assert!(older < newer);
        assert!(newer > older);
        assert_eq!(older, Year::new("1999").unwrap());
        assert_eq!(older.max(newer.clone()), newer);
    }

    #[test]
    fn test_status_from_json() {
        assert_eq!(Status::from_json(Some(&json!(true))).unwrap(), Status::AVAILABLE);
        assert_eq!(Status::from_json(Some(&json!(false))).unwrap(), Status::CHECKED_OUT);
        assert_eq!(
            Status::from_json(None).unwrap_err(),
            ValueError::Empty { field: Field::Status }
        );
        assert_eq!(
            Status::from_json(Some(&Value::Null)).unwrap_err(),
            ValueError::Empty { field: Field::Status }
        );
        assert!(matches!(
            Status::from_json(Some(&json!("yes"))).unwrap_err(),
            ValueError::MustBeBoolean { .. }
        ));
        assert!(matches!(
            Status::from_json(Some(&json!(1))).unwrap_err(),
            ValueError::MustBeBoolean { .. }
        ));
    }

    #[test]
    fn test_status_defaults_to_available_and_toggles() {
        let status = Status::default();
        assert!(status.is_available());
        assert!(!status.toggled().is_available());
        assert_eq!(status.toggled().toggled(), status);
    }

    #[test]
    fn test_errors_name_field_and_value() {
        let err = Title::new("ab").unwrap_err();
        assert_eq!(err.field(), Field::Title);
        assert_eq!(err.to_string(), "title must be at least 3 characters long: \"ab\"");

        let err = Year::new("20x0").unwrap_err();
        assert_eq!(err.field(), Field::Year);
        assert!(err.to_string().contains("20x0"));
    }
}
