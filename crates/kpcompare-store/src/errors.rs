//! Error handling for kpcompare-store
//!
//! Wraps kpcompare-core ExError with provider-specific helpers

use kpcompare_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a document format error
pub fn format_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Format)
        .with_op("parse_document")
        .with_message(reason)
}

/// Create an error for an XML syntax failure at a byte offset
pub fn xml_error(position: impl std::fmt::Display, err: impl std::fmt::Display) -> ExError {
    format_error(format!("XML error at byte {}: {}", position, err))
}

/// Create an error for a password that does not unlock the document
pub fn decryption_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Decryption)
        .with_op("open_document")
        .with_message(reason)
}

/// Create an error for a container this provider cannot read
pub fn unsupported_container(path: &Path, container: &str, hint: &str) -> ExError {
    ExError::new(ExErrorKind::Format)
        .with_op("open_document")
        .with_path(path.display().to_string())
        .with_message(format!("{} is not supported; {}", container, hint))
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}
