//! keepass-compare Store - document providers
//!
//! Provides:
//! - The `DocumentProvider` seam between files on disk and the comparison core
//! - A KeePass 2.x XML reader and a KDBX reader, both producing a `DocumentTree`
//! - Container signature sniffing to pick the reader for a file

pub mod detect;
pub mod errors;
pub mod kdbx;
pub mod provider;
pub mod signature;
pub mod xml;

// Re-export key types
pub use detect::AnyDocumentProvider;
pub use errors::Result;
pub use kdbx::KdbxDocumentProvider;
pub use provider::{open_document, DocumentProvider};
pub use xml::XmlDocumentProvider;
