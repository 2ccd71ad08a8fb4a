//! Change computation and rendering.
//!
//! Compares the record indexes of two documents and produces a structured,
//! deterministic [`ChangeReport`] that the text and JSON renderers consume.
//!
//! ## Entry point
//!
//! ```ignore
//! use kpcompare_core::diff::{compare_trees, render_human_summary};
//!
//! let report = compare_trees(&before, &after, Strategy::Uuid)?;
//! print!("{}", render_human_summary(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical reports, sorted by
//!   path, then change kind, then key.
//! - **Fail fast**: a kind mismatch across a matched key aborts the comparison
//!   instead of comparing incompatible field sets.

pub mod comparator;
pub mod engine;
pub mod human_summary;
pub mod model;

pub use comparator::compare_descriptors;
pub use engine::{compare_trees, compute_changes};
pub use human_summary::{render_human_summary, render_json, NO_CHANGES};
pub use model::{Change, ChangeKind, ChangeReport, ChangeSummary};
