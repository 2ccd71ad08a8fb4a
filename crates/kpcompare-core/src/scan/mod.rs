//! Tree scanning.
//!
//! Turns a [`DocumentTree`](crate::model::DocumentTree) into a
//! [`RecordIndex`]: one [`Descriptor`] per Group and Entry, keyed by the
//! [`ComparisonKey`] the active strategy derives for it.
//!
//! ## Entry point
//!
//! ```
//! use kpcompare_core::model::{DocumentTree, EntryNode, GroupNode, Strategy};
//! use kpcompare_core::scan::scan_document;
//!
//! let mut tree = DocumentTree::new();
//! let root = tree.add_group(tree.root(), GroupNode::new("g1", "Root"));
//! tree.add_entry(root, EntryNode::new("e1", "Mail"));
//!
//! let index = scan_document(&tree, Strategy::Path).unwrap();
//! assert_eq!(index.len(), 2);
//! ```
//!
//! ## Guarantees
//!
//! - **Parents first**: a record's path is always derived from an already
//!   scanned parent.
//! - **Unique keys**: a key collision fails the scan instead of dropping a record.
//! - **Read-only**: descriptors borrow the tree and never modify it.

pub mod descriptor;
pub mod index;
pub mod key;
pub mod scanner;

pub use descriptor::{Descriptor, FixedFields};
pub use index::RecordIndex;
pub use key::{comparison_key, parent_key, ComparisonKey};
pub use scanner::scan_document;
