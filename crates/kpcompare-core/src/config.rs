//! Run configuration
//!
//! Both settings are validated up front so that an invalid value is rejected
//! before any document is opened.

use crate::errors::{CompareError, Result};
use crate::model::Strategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the change report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line-oriented human report
    #[default]
    Text,
    /// Structured [`ChangeReport`](crate::diff::ChangeReport) as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CompareError::UnsupportedFormat {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated settings for one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompareConfig {
    pub strategy: Strategy,
    pub format: OutputFormat,
}

impl CompareConfig {
    /// Parse strategy and output format names
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedStrategy` or `UnsupportedFormat` for unknown names.
    pub fn new(strategy: &str, format: &str) -> Result<Self> {
        Ok(Self {
            strategy: strategy.parse()?,
            format: format.parse()?,
        })
    }
}
