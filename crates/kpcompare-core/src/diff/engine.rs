//! Change computation engine.
//!
//! The core entry point is [`compute_changes`], which accepts the record
//! indexes of two documents and produces a [`ChangeReport`].
//! [`compare_trees`] scans both trees first.

use crate::diff::comparator::compare_descriptors;
use crate::diff::model::{Change, ChangeKind, ChangeReport};
use crate::errors::{CompareError, Result};
use crate::model::{DocumentTree, Strategy};
use crate::scan::{scan_document, RecordIndex};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Compute the changes needed to turn document A into document B
///
/// - keys only in A are `Removed`, reported at A's path
/// - keys only in B are `Added`, reported at B's path
/// - keys in both with at least one difference are `Modified`, reported at
///   B's path
///
/// # Errors
///
/// - `StrategyMismatch` if the indexes were keyed with different strategies
/// - `MalformedRecord` if a key matches records of different kinds
pub fn compute_changes(a: &RecordIndex<'_>, b: &RecordIndex<'_>) -> Result<ChangeReport> {
    log_op_start!(
        "compute_changes",
        strategy = a.strategy().as_str(),
        a_records = a.len(),
        b_records = b.len()
    );
    let start = Instant::now();

    let report = diff_indexes(a, b).map_err(|e| {
        log_op_error!(
            "compute_changes",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "compute_changes",
        duration_ms = start.elapsed().as_millis() as u64,
        change_count = report.changes.len()
    );
    Ok(report)
}

fn diff_indexes(a: &RecordIndex<'_>, b: &RecordIndex<'_>) -> Result<ChangeReport> {
    if a.strategy() != b.strategy() {
        return Err(CompareError::StrategyMismatch {
            first: a.strategy().to_string(),
            second: b.strategy().to_string(),
        });
    }

    let mut changes = Vec::new();

    for (key, descriptor) in a.iter().filter(|(key, _)| !b.contains_key(*key)) {
        changes.push(Change {
            kind: ChangeKind::Removed,
            path: descriptor.display_path().to_string(),
            key: key.to_string(),
            details: vec!["Removed".to_string()],
        });
    }

    for (key, descriptor) in b.iter() {
        match a.get(key) {
            None => changes.push(Change {
                kind: ChangeKind::Added,
                path: descriptor.display_path().to_string(),
                key: key.to_string(),
                details: vec!["Added".to_string()],
            }),
            Some(before) => {
                let details = compare_descriptors(before, descriptor)?;
                if !details.is_empty() {
                    changes.push(Change {
                        kind: ChangeKind::Modified,
                        path: descriptor.display_path().to_string(),
                        key: key.to_string(),
                        details,
                    });
                }
            }
        }
    }

    Ok(ChangeReport::new(a.strategy(), changes))
}

/// Scan two trees with the same strategy and compare them
///
/// # Errors
///
/// Any scan error of either tree, or any error of [`compute_changes`].
pub fn compare_trees(a: &DocumentTree, b: &DocumentTree, strategy: Strategy) -> Result<ChangeReport> {
    let a_index = scan_document(a, strategy)?;
    let b_index = scan_document(b, strategy)?;
    compute_changes(&a_index, &b_index)
}
