//! Core error types for the InvestAI backend.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use serde::Serialize;
use thiserror::Error;

use investai_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the backend.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Assistant request failed: {0}")]
    Assistant(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid fields: {}", describe_fields(.0))]
    Fields(Vec<FieldError>),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Field-level details for the client.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ValidationError::Fields(fields) => fields.clone(),
            ValidationError::MissingField(field) => {
                vec![FieldError::new(field.clone(), "is required")]
            }
            _ => Vec::new(),
        }
    }
}

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Error::Validation(ValidationError::Fields(vec![FieldError::new(field, message)]))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_are_listed() {
        let err = ValidationError::Fields(vec![
            FieldError::new("shares", "must be greater than 0"),
            FieldError::new("symbol", "is required"),
        ]);
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "Invalid fields: shares: must be greater than 0, symbol: is required"
        );
    }

    #[test]
    fn test_market_data_errors_convert() {
        let err: Error = MarketDataError::MissingCredential {
            provider: "FINNHUB".to_string(),
        }
        .into();
        assert!(matches!(err, Error::MarketData(_)));
    }
}
