//! Field comparison of two records sharing a comparison key.

use crate::errors::{CompareError, Result};
use crate::scan::Descriptor;

/// Difference lines between two matched records
///
/// An empty list means the records are equal. Lines are produced in this
/// order: parent change, fixed fields in schema order, then custom strings
/// (removed, added, modified; each group sorted by name). All comparisons are
/// exact; a missing value only equals another missing value.
///
/// # Errors
///
/// Returns `MalformedRecord` if the two records are of different kinds.
pub fn compare_descriptors(a: &Descriptor<'_>, b: &Descriptor<'_>) -> Result<Vec<String>> {
    if a.kind() != b.kind() {
        return Err(CompareError::MalformedRecord {
            path: b.display_path().to_string(),
            reason: format!(
                "key matches a {} in the first document but a {} in the second",
                a.kind(),
                b.kind()
            ),
        });
    }

    let mut details = Vec::new();

    if a.parent_key() != b.parent_key() {
        details.push("Changed parents.".to_string());
    }

    for ((field, before), (_, after)) in a.fields().values().into_iter().zip(b.fields().values()) {
        if before != after {
            details.push(format!("{} field changed.", field));
        }
    }

    let before = a.strings();
    let after = b.strings();

    for name in before.keys().filter(|name| !after.contains_key(*name)) {
        details.push(format!("{} string removed.", name));
    }
    for name in after.keys().filter(|name| !before.contains_key(*name)) {
        details.push(format!("{} string added.", name));
    }
    for (name, value) in before {
        if let Some(other) = after.get(name) {
            if value != other {
                details.push(format!("{} string modified.", name));
            }
        }
    }

    Ok(details)
}
