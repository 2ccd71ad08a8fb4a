//! Provider choosing the reader from the file's leading bytes

use crate::errors::{io_error, unsupported_container, Result};
use crate::kdbx::decrypt_document;
use crate::provider::DocumentProvider;
use crate::signature::{signature_hex, sniff, sniff_file, Container};
use crate::xml::parse_bytes;
use kpcompare_core::DocumentTree;
use kpcompare_core_types::Sensitive;
use std::path::Path;

/// Opens KDBX databases and KeePass XML exports alike
///
/// KDBX files are decrypted with the password, XML files ignore it, and
/// legacy KDB files are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyDocumentProvider;

impl AnyDocumentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentProvider for AnyDocumentProvider {
    fn open(&self, path: &Path, password: &Sensitive<String>) -> Result<DocumentTree> {
        let bytes = std::fs::read(path).map_err(|e| io_error("open_document", path, e))?;

        let container = sniff(&bytes);
        tracing::debug!(
            document_path = %path.display(),
            signature = %signature_hex(&bytes),
            container = ?container,
            "sniffed container"
        );

        let tree = match container {
            Container::Kdbx { .. } => decrypt_document(&bytes, password),
            Container::Kdb => {
                return Err(unsupported_container(
                    path,
                    &container.describe(),
                    "convert it to KDBX with KeePass 2.x first",
                ))
            }
            Container::Plain => parse_bytes(&bytes),
        };
        tree.map_err(|e| e.with_path(path.display().to_string()))
    }

    /// Only KDBX files need one; an unreadable file is left for `open` to report
    fn requires_password(&self, path: &Path) -> bool {
        matches!(sniff_file(path), Ok(Container::Kdbx { .. }))
    }
}
