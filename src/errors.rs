/*!
 * Error types for the slpcheck application.
 *
 * This module contains custom error types for the different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while reading a localization document.
///
/// Any of these aborts the whole document pass: no findings are reported
/// for a document that failed to parse.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The XML itself is not well formed
    #[error("Malformed document at byte {position}: {message}")]
    Malformed {
        /// Byte offset reported by the XML reader
        position: usize,
        /// Reader error message
        message: String,
    },

    /// A structural element lacks an attribute the checker relies on
    #[error("Element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    /// An element appeared where the document structure does not allow it
    #[error("Unexpected <{element}>: {reason}")]
    UnexpectedElement {
        element: String,
        reason: String,
    },

    /// Input ended while an element was still open
    #[error("Document ended inside <{0}>")]
    UnexpectedEof(String),

    /// Error reading the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document parsing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
