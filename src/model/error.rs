//! Error types for the clearcheck application.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level startup/shutdown failures returned from `main`
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing subscriber setup
//!   - [`TemplateError`](crate::templates::TemplateError) - `--load-templates` failures
//!   - [`SearchError`] - client construction failures (e.g. TLS backend)
//!   - `std::io::Error` - terminal failures
//! - [`SearchError`] - any failure of one search call (transport, status, decode, shape)
//! - [`ExportError`] - spreadsheet encoding or file write failures
//!
//! # Error Recovery Strategy
//!
//! Search and export errors are **non-fatal**: the orchestrator records a single
//! user-facing message, keeps the last good results, and the TUI stays usable.
//! Only `AppError` terminates the process.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Everything that can stop the program before or after the event loop. Errors
/// raised while the TUI is running are recovered locally and never become an
/// `AppError`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Search templates could not be read or registered.
    #[error("Template error: {0}")]
    Templates(#[from] crate::templates::TemplateError),

    /// The HTTP client could not be constructed.
    #[error("Search client error: {0}")]
    Client(#[from] SearchError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot function; attempt cleanup
    /// and exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of one call to the search service.
///
/// The variants exist for logging; the operator only ever sees
/// [`SearchError::USER_MESSAGE`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Connection, TLS, timeout or other transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("Search service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for the log.
        body: String,
    },

    /// The body was not the JSON shape we decode.
    #[error("Failed to decode search response: {0}")]
    Decode(String),

    /// Valid JSON, but missing the section the active mode needs.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(&'static str),
}

impl SearchError {
    /// The one message surfaced for every search failure.
    pub const USER_MESSAGE: &'static str = "Failed to fetch data. Please try again.";

    /// Message to show the operator.
    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}

/// Failure while producing the spreadsheet export.
///
/// An empty selection is not an error: export simply produces nothing.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The xlsx encoder rejected the workbook.
    #[error("Failed to encode spreadsheet: {0}")]
    Encode(String),

    /// Writing the artifact to disk failed.
    #[error("Failed to write export to {path}: {source}")]
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Encode(err.to_string())
    }
}
