//! Student record and validated input types
//!
//! Names and emails are trimmed on construction. The store still owns email
//! uniqueness; nothing here checks for duplicates.

use std::fmt;

use chrono::NaiveDate;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for first/last names
const MAX_NAME_LEN: usize = 100;

/// Maximum length for email addresses
const MAX_EMAIL_LEN: usize = 255;

/// Wire format for enrollment dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Student record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: Option<NaiveDate>,
}

impl Student {
    /// "First Last" for confirmation messages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Primary key of a student row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(i32);

impl StudentId {
    /// Wrap an id that is already known to be positive (e.g. read back from the store).
    pub fn new(id: i32) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::NotPositive {
                field: "student ID",
                value: i64::from(id),
            });
        }
        Ok(Self(id))
    }

    /// Parse a typed-in id.
    ///
    /// # Example
    /// ```
    /// use studentdb_core::models::StudentId;
    ///
    /// assert_eq!(StudentId::parse(" 42 ").unwrap().get(), 42);
    /// assert!(StudentId::parse("abc").is_err());
    /// assert!(StudentId::parse("0").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "student ID" });
        }
        let id: i32 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "student ID",
            reason: "please enter a number",
        })?;
        Self::new(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated first or last name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// `field` names the prompt in error messages ("first name", "last name").
    pub fn new(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if s.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated email address
///
/// Only the shape is checked here: non-empty, no whitespace, contains `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if s.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must not contain spaces",
            });
        }
        if !s.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must contain '@'",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an enrollment date. Blank input means "no date".
pub fn parse_enrollment_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            value: raw.to_owned(),
        })
}

/// Validated payload for `INSERT INTO students`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub enrollment_date: Option<NaiveDate>,
}

impl NewStudent {
    /// Validate all four raw fields at once.
    ///
    /// # Example
    /// ```
    /// use studentdb_core::models::NewStudent;
    ///
    /// let s = NewStudent::parse("Alice", "Johnson", "alice@x.com", "2024-01-15").unwrap();
    /// assert_eq!(s.email.as_str(), "alice@x.com");
    /// assert!(NewStudent::parse("", "Johnson", "alice@x.com", "").is_err());
    /// ```
    pub fn parse(
        first_name: &str,
        last_name: &str,
        email: &str,
        enrollment_date: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: PersonName::new("first name", first_name)?,
            last_name: PersonName::new("last name", last_name)?,
            email: Email::new(email)?,
            enrollment_date: parse_enrollment_date(enrollment_date)?,
        })
    }
}

/// Result of a successful email update
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EmailChange {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub old_email: String,
    pub new_email: String,
}
