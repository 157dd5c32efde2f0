//! Error types for the Wage Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! compiling tax tables, building calendars and editing worked hours.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Wage Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use wage_engine::error::EngineError;
///
/// let error = EngineError::UnknownTable {
///     year: 2023,
///     name: "9999".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown tax table '9999' for year 2023");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A fixed-width tax table record was malformed.
    #[error("Malformed tax table record on line {line}: {message}")]
    TaxTableParse {
        /// The 1-based line number of the offending record.
        line: usize,
        /// A description of what was wrong with the record.
        message: String,
    },

    /// A parsed tax table could not be compiled into a lookup.
    #[error("Invalid tax table '{name}': {message}")]
    InvalidTaxTable {
        /// The table name.
        name: String,
        /// A description of what made the table invalid.
        message: String,
    },

    /// A tax table name was not present in the compiled set for a year.
    #[error("Unknown tax table '{name}' for year {year}")]
    UnknownTable {
        /// The tax year that was queried.
        year: i32,
        /// The table name that was not found.
        name: String,
    },

    /// A calendar or tax request named a year that is not configured.
    #[error("Unknown year: {year}")]
    UnknownYear {
        /// The year that was requested.
        year: i32,
    },

    /// A year outside the range the calendar builder can represent.
    #[error("Unsupported calendar year: {year}")]
    UnsupportedYear {
        /// The year that was requested.
        year: i32,
    },

    /// No holiday calendar is available for the country code.
    #[error("Unsupported holiday country: {code}")]
    UnsupportedCountry {
        /// The country code that was requested.
        code: String,
    },

    /// Hours outside 0 to 24 were passed for a day.
    #[error("Invalid hours {hours} for {date}: hours must be between 0 and 24")]
    InvalidHours {
        /// The day that was being edited.
        date: NaiveDate,
        /// The rejected value.
        hours: Decimal,
    },

    /// A day was addressed in a year that does not contain it.
    #[error("Date {date} is not part of year {year}")]
    DayNotInYear {
        /// The date that was addressed.
        date: NaiveDate,
        /// The year of the wage state.
        year: i32,
    },

    /// The configured number of open wage sessions has been reached.
    #[error("Session limit reached: at most {limit} sessions may be open")]
    SessionLimitReached {
        /// The configured maximum.
        limit: usize,
    },

    /// A wage session id did not match any open session.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The session id that was not found.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
