//! Error types for flightlog.
//!
//! This module defines the error types used throughout the flightlog crate.
//! User-entered form values are parsed permissively and never surface here;
//! these errors cover persistence, configuration, and explicit validation.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Record Errors ===
    /// A clock time could not be parsed as `HH:MM`.
    #[error("invalid time of day '{value}': expected HH:MM (24-hour)")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A flight record carries a number of routes outside `1..=3`.
    #[error("a flight record must have between 1 and 3 routes, got {count}")]
    InvalidRouteCount {
        /// Number of routes found on the record.
        count: usize,
    },

    /// No flight record with the given id exists.
    #[error("flight record not found: {id}")]
    FlightNotFound {
        /// The id that was looked up.
        id: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid time error for the given input.
    #[must_use]
    pub fn invalid_time(value: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
        }
    }

    /// Create a flight-not-found error for the given id.
    #[must_use]
    pub fn flight_not_found(id: impl Into<String>) -> Self {
        Self::FlightNotFound { id: id.into() }
    }
}
