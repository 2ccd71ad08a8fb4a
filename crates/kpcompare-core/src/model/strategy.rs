use crate::errors::CompareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How records are matched across the two documents
///
/// Exactly one strategy is active per run and applied to both documents.
///
/// - `Uuid` matches by the persistent record identifier. Renames and moves are
///   reported as modifications (`Changed parents.` for moves).
/// - `Path` matches by the full ancestor-name path. Any rename or move shows up
///   as a removal plus an addition, including every re-keyed descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Uuid,
    Path,
}

impl Strategy {
    /// Name used on the command line and in structured output
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Uuid => "uuid",
            Strategy::Path => "path",
        }
    }
}

impl FromStr for Strategy {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uuid" => Ok(Strategy::Uuid),
            "path" => Ok(Strategy::Path),
            other => Err(CompareError::UnsupportedStrategy {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
