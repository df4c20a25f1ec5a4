//! Core error types for the Tirta back office.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the back office.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Posting failed: {0}")]
    Posting(#[from] PostingError),

    #[error("Depreciation calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Report generation failed: {0}")]
    Report(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
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

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

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

/// Errors raised while turning a source document into ledger lines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostingError {
    #[error("{source_type} {id} is already posted")]
    AlreadyPosted { source_type: String, id: String },

    #[error("{source_type} {id} is not posted")]
    NotPosted { source_type: String, id: String },

    #[error("{0}")]
    Unpostable(String),

    #[error("Unknown source type '{0}'")]
    UnknownSourceType(String),
}

/// Errors raised by the depreciation calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Acquisition value cannot be negative")]
    NegativeAcquisition,

    #[error("Residual value cannot be negative")]
    NegativeResidual,

    #[error("Declining-balance depreciation requires a rate or a depreciation class")]
    MissingRate,

    #[error("Depreciation rate {0} is outside (0, 1]")]
    InvalidRate(String),

    #[error("Amount {0} exceeds the supported maximum")]
    AmountTooLarge(String),

    #[error("Useful life of {0} months exceeds the supported maximum")]
    UsefulLifeTooLong(u32),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// Returns true when the error means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::Database(DatabaseError::NotFound(_))
        )
    }

    /// Returns true when the error comes from a unique index.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::UniqueViolation(_)))
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Report(err.to_string())
    }
}
