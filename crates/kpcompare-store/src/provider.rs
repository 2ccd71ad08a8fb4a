//! Document provider seam
//!
//! A provider turns a file on disk into the read-only [`DocumentTree`] the
//! comparison core works on. Any failure is fatal for the run and is surfaced
//! to the caller unchanged.

use crate::errors::Result;
use kpcompare_core::{log_op_end, log_op_error, log_op_start, DocumentTree};
use kpcompare_core_types::Sensitive;
use std::path::Path;
use std::time::Instant;

/// Opens credential-store documents
pub trait DocumentProvider {
    /// Read and decode the document at `path`
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `Format` if the file is not a document this provider understands
    /// - `Decryption` if the password does not unlock the document
    fn open(&self, path: &Path, password: &Sensitive<String>) -> Result<DocumentTree>;

    /// Whether [`open`](Self::open) needs a password for the file at `path`
    fn requires_password(&self, path: &Path) -> bool;
}

/// Open a document through `provider`, logging the operation boundary
///
/// # Errors
///
/// Whatever the provider returns.
pub fn open_document(
    provider: &dyn DocumentProvider,
    path: &Path,
    password: &Sensitive<String>,
) -> Result<DocumentTree> {
    log_op_start!("open_document", document_path = %path.display());
    let start = Instant::now();

    let tree = provider.open(path, password).map_err(|e| {
        log_op_error!(
            "open_document",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "open_document",
        duration_ms = start.elapsed().as_millis() as u64,
        record_count = tree.record_count()
    );
    Ok(tree)
}
