//! KeePass 2.x XML documents
//!
//! Reads the XML form of a KeePass database, as written by KeePass's
//! "KeePass XML (2.x)" export. The file is not encrypted, so the password
//! is accepted and ignored.

pub mod parser;

use crate::errors::{format_error, io_error, unsupported_container, Result};
use crate::provider::DocumentProvider;
use crate::signature::{signature_hex, sniff};
use kpcompare_core::DocumentTree;
use kpcompare_core_types::Sensitive;
use std::path::Path;

pub use parser::parse_document;

/// Parse raw file contents, which must be UTF-8
///
/// # Errors
///
/// Returns a `Format` error for invalid UTF-8 or anything
/// [`parse_document`] rejects.
pub fn parse_bytes(bytes: &[u8]) -> Result<DocumentTree> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| format_error(format!("document is not valid UTF-8: {}", e)))?;
    parse_document(text)
}

/// Provider for KeePass 2.x XML files
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDocumentProvider;

impl XmlDocumentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentProvider for XmlDocumentProvider {
    fn open(&self, path: &Path, _password: &Sensitive<String>) -> Result<DocumentTree> {
        let bytes = std::fs::read(path).map_err(|e| io_error("open_document", path, e))?;

        let container = sniff(&bytes);
        tracing::debug!(
            document_path = %path.display(),
            signature = %signature_hex(&bytes),
            container = ?container,
            "sniffed container"
        );
        if container.is_encrypted() {
            return Err(unsupported_container(
                path,
                &container.describe(),
                "export it as KeePass XML (2.x) or open it as a database",
            ));
        }

        parse_bytes(&bytes).map_err(|e| e.with_path(path.display().to_string()))
    }

    fn requires_password(&self, _path: &Path) -> bool {
        false
    }
}
