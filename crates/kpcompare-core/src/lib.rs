//! keepass-compare Core - comparison engine for credential-store documents
//!
//! This crate provides the in-memory comparison kernel:
//! - A read-only document tree of Groups and Entries
//! - The tree scanner that flattens a document into a keyed record index
//! - Key selection under the `uuid` and `path` strategies
//! - The differ and field comparator producing a structured change report
//! - Text and JSON renderers for the change report
//!
//! Opening files is left to a document provider (see `kpcompare-store`); this
//! crate only ever sees an already-decrypted tree.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod scan;

// Re-export commonly used types
pub use config::{CompareConfig, OutputFormat};
pub use diff::{
    compare_trees, compute_changes, render_human_summary, render_json, Change, ChangeKind,
    ChangeReport,
};
pub use errors::{CompareError, ExError, ExErrorKind, Result};
pub use model::{DocumentTree, EntryNode, GroupNode, NodeId, NodeKind, Strategy};
pub use scan::{scan_document, ComparisonKey, Descriptor, RecordIndex};
