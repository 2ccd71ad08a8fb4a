//! Change report output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! `changes` is always sorted, so serialising the same report twice yields
//! identical bytes.

use crate::model::Strategy;
use serde::{Deserialize, Serialize};

/// What happened to a record between the two documents
///
/// The declaration order is the tie-break order for changes sharing a path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Removed,
    Added,
    Modified,
}

impl ChangeKind {
    /// Prefix used by the text report
    pub fn symbol(&self) -> char {
        match self {
            ChangeKind::Removed => '-',
            ChangeKind::Added => '+',
            ChangeKind::Modified => '!',
        }
    }
}

/// One reported difference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    /// Display path of the record (from the second document for modifications)
    pub path: String,
    /// Rendered comparison key the record was matched on
    pub key: String,
    /// Human-readable difference lines, in comparison order
    pub details: Vec<String>,
}

/// Counts per change kind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

/// Structured result of comparing two documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeReport {
    /// Strategy both documents were keyed with
    pub strategy: Strategy,
    pub summary: ChangeSummary,
    /// Sorted by path, then kind, then key
    pub changes: Vec<Change>,
}

impl ChangeReport {
    /// Build a report, sorting the changes and counting them per kind
    pub fn new(strategy: Strategy, mut changes: Vec<Change>) -> Self {
        changes.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then(a.kind.cmp(&b.kind))
                .then_with(|| a.key.cmp(&b.key))
        });

        let mut summary = ChangeSummary::default();
        for change in &changes {
            match change.kind {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Modified => summary.modified += 1,
            }
        }

        Self {
            strategy,
            summary,
            changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
