use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    NotFound {
        message: String,
    },
    // Stock exhausted on borrow. Not retryable by the caller unless stock is
    // returned in the meantime.
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    // Deletion blocked by open loans, duplicate open loan, or the conditional
    // stock update kept losing to concurrent writers.
    Conflict {
        message: String,
        reason_code: Option<String>,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Internal {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Unavailable { message: message.to_string(), reason_code }
    }

    pub fn conflict(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Conflict { message: message.to_string(), reason_code }
    }

    pub fn database_or_not_found(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if let Some(ref reason_val) = reason {
            if !retryable && reason_val.as_str().contains("404") {
                return LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str());
            }
        }
        LibraryError::database(
            format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, retryable)
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn internal(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Internal { message: message.to_string(), reason_code }
    }

}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Unavailable { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Conflict { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Internal { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the library services.
pub type LibraryResult<T> = Result<T, LibraryError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// LoanStatus is derived from return_date: a record is Open until it is returned.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Open,
    Closed,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Closed" => LoanStatus::Closed,
            _ => LoanStatus::Open,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Open => write!(f, "Open"),
            LoanStatus::Closed => write!(f, "Closed"),
        }
    }
}

// EntityKind names the entities a borrow record refers to.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum EntityKind {
    Book,
    Member,
}

impl EntityKind {
    // foreign key column on borrow_records
    pub fn loan_field(&self) -> &'static str {
        match self {
            EntityKind::Book => "book_id",
            EntityKind::Member => "member_id",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "book"),
            EntityKind::Member => write!(f, "member"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Category,
}

impl SearchField {
    pub fn column(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Category => "category",
        }
    }
}

impl FromStr for SearchField {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "category" => Ok(SearchField::Category),
            other => Err(LibraryError::validation(
                format!("unsupported search field {}, expected title|author|category", other).as_str(),
                Some("400".to_string()))),
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::core::library::{EntityKind, LibraryError, LoanStatus, SearchField};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(LibraryError::unavailable("test", None), LibraryError::Unavailable{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_conflict_error() {
        assert!(matches!(LibraryError::conflict("test", None), LibraryError::Conflict{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_internal_error() {
        assert!(matches!(LibraryError::internal("test", None), LibraryError::Internal{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_not_found_error() {
        assert!(matches!(LibraryError::database_or_not_found("test", Some("404".to_string()), false), LibraryError::NotFound{ message: _ }));
        assert!(matches!(LibraryError::database_or_not_found("test", Some("404".to_string()), true), LibraryError::Database{ .. }));
        assert!(matches!(LibraryError::database_or_not_found("test", Some("500".to_string()), false), LibraryError::Database{ .. }));
        assert!(matches!(LibraryError::database_or_not_found("test", None, false), LibraryError::Database{ .. }));
    }

    #[tokio::test]
    async fn test_should_format_loan_status() {
        for status in vec![LoanStatus::Open, LoanStatus::Closed] {
            let str = status.to_string();
            assert_eq!(status, LoanStatus::from(str));
        }
    }

    #[tokio::test]
    async fn test_should_map_entity_kind_to_loan_field() {
        assert_eq!("book_id", EntityKind::Book.loan_field());
        assert_eq!("member_id", EntityKind::Member.loan_field());
    }

    #[tokio::test]
    async fn test_should_parse_search_field() {
        assert_eq!(SearchField::Title, SearchField::from_str("").expect("default field"));
        assert_eq!(SearchField::Author, SearchField::from_str("Author").expect("author"));
        assert_eq!(SearchField::Category, SearchField::from_str(" category ").expect("category"));
        assert!(matches!(SearchField::from_str("isbn"), Err(LibraryError::Validation { .. })));
    }
}
