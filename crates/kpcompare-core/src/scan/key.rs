//! Key selection
//!
//! Pure functions deriving the comparison key of a record and the key of its
//! parent under the active [`Strategy`].

use crate::model::Strategy;
use std::fmt;

/// Key used to match records across the two documents
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComparisonKey {
    /// Persistent record identifier
    Uuid(String),
    /// Names from the top-level group down to the record
    Path(Vec<String>),
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonKey::Uuid(uuid) => f.write_str(uuid),
            ComparisonKey::Path(segments) => f.write_str(&segments.join("/")),
        }
    }
}

/// Key of a record given its identifier and full name path
pub fn comparison_key(strategy: Strategy, identity_id: &str, segments: &[String]) -> ComparisonKey {
    match strategy {
        Strategy::Uuid => ComparisonKey::Uuid(identity_id.to_string()),
        Strategy::Path => ComparisonKey::Path(segments.to_vec()),
    }
}

/// Key of a record's parent, rendered as a string
///
/// `parent_uuid` is `None` when the parent is the document root. Under the
/// `uuid` strategy that yields the empty string; under `path` the parent's
/// segments are joined with a trailing separator, so the root yields `/`.
pub fn parent_key(strategy: Strategy, parent_uuid: Option<&str>, parent_segments: &[String]) -> String {
    match strategy {
        Strategy::Uuid => parent_uuid.unwrap_or_default().to_string(),
        Strategy::Path => format!("{}/", parent_segments.join("/")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_uuid_key_ignores_path() {
        let a = comparison_key(Strategy::Uuid, "u1", &segs(&["Root", "Old"]));
        let b = comparison_key(Strategy::Uuid, "u1", &segs(&["Root", "New"]));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "u1");
    }

    #[test]
    fn test_path_key_ignores_uuid() {
        let a = comparison_key(Strategy::Path, "u1", &segs(&["Root", "Mail"]));
        let b = comparison_key(Strategy::Path, "u2", &segs(&["Root", "Mail"]));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Root/Mail");
    }

    #[test]
    fn test_parent_key_of_top_level_record() {
        assert_eq!(parent_key(Strategy::Uuid, None, &[]), "");
        assert_eq!(parent_key(Strategy::Path, None, &[]), "/");
    }

    #[test]
    fn test_parent_key_of_nested_record() {
        let parent = segs(&["Root", "Work"]);
        assert_eq!(parent_key(Strategy::Uuid, Some("g-work"), &parent), "g-work");
        assert_eq!(parent_key(Strategy::Path, Some("g-work"), &parent), "Root/Work/");
    }

    #[test]
    fn test_path_keys_order_by_segments() {
        let shallow = ComparisonKey::Path(segs(&["Root"]));
        let deep = ComparisonKey::Path(segs(&["Root", "A"]));
        assert!(shallow < deep);
    }
}
