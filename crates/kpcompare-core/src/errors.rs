use thiserror::Error;

/// Result type alias using CompareError
pub type Result<T> = std::result::Result<T, CompareError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure of a comparison run maps onto exactly one kind. Each kind has a
/// stable code that tests and front ends can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    UnsupportedStrategy,
    UnsupportedFormat,
    StrategyMismatch,

    // Scanning / comparison
    DuplicateKey,
    MalformedRecord,

    // Document provider
    /// The provider could not unlock the document (wrong password, bad key file)
    Decryption,
    /// The document is not in a format the provider understands
    Format,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnsupportedStrategy => "ERR_UNSUPPORTED_STRATEGY",
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::StrategyMismatch => "ERR_STRATEGY_MISMATCH",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::MalformedRecord => "ERR_MALFORMED_RECORD",
            ExErrorKind::Decryption => "ERR_DECRYPTION",
            ExErrorKind::Format => "ERR_FORMAT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the kind plus optional context (operation, document path, record
/// identity) so that a failure can be diagnosed without a debugger.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document or record path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add record identity context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the record identity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for comparison runs
///
/// All of these are fatal: a run either scans both documents cleanly and
/// produces a report, or aborts with one of these before printing anything.
/// Provider failures (decryption, container format, IO) are raised by the
/// document provider as [`ExError`] and never pass through this enum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    // ===== Configuration Errors =====
    /// Comparison strategy is not one of `uuid` / `path`
    #[error("Unsupported comparison strategy: {requested} (expected 'uuid' or 'path')")]
    UnsupportedStrategy { requested: String },

    /// Output format is not one of `text` / `json`
    #[error("Unsupported output format: {requested} (expected 'text' or 'json')")]
    UnsupportedFormat { requested: String },

    /// Two record indexes built under different strategies were compared
    #[error("Cannot compare an index keyed by {first} with one keyed by {second}")]
    StrategyMismatch { first: String, second: String },

    // ===== Scan Errors =====
    /// Two records in one document resolve to the same comparison key
    #[error("Duplicate comparison key {key}: '{first_path}' collides with '{second_path}'")]
    DuplicateKey {
        key: String,
        first_path: String,
        second_path: String,
    },

    /// A record is missing something needed to key or compare it
    #[error("Malformed record at {path}: {reason}")]
    MalformedRecord { path: String, reason: String },

    // ===== Output Errors =====
    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from CompareError to ExError
///
/// Used by the logging macros so every failure is reported with a stable code.
impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::UnsupportedStrategy { requested } => {
                ExError::new(ExErrorKind::UnsupportedStrategy)
                    .with_op("parse_strategy")
                    .with_message(format!("Unsupported comparison strategy: {}", requested))
            }

            CompareError::UnsupportedFormat { requested } => {
                ExError::new(ExErrorKind::UnsupportedFormat)
                    .with_op("parse_output_format")
                    .with_message(format!("Unsupported output format: {}", requested))
            }

            CompareError::StrategyMismatch { first, second } => {
                ExError::new(ExErrorKind::StrategyMismatch)
                    .with_op("compute_changes")
                    .with_message(format!("{} vs {}", first, second))
            }

            CompareError::DuplicateKey {
                key,
                first_path,
                second_path,
            } => ExError::new(ExErrorKind::DuplicateKey)
                .with_op("scan_document")
                .with_entity_id(key)
                .with_path(second_path)
                .with_message(format!("Key already used by '{}'", first_path)),

            CompareError::MalformedRecord { path, reason } => {
                ExError::new(ExErrorKind::MalformedRecord)
                    .with_path(path)
                    .with_message(reason)
            }

            CompareError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to CompareError
impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        CompareError::Serialization {
            message: err.to_string(),
        }
    }
}
