//! Operation boundary macros
//!
//! Every public operation of the workspace (`scan_document`,
//! `compute_changes`, `open_document`) logs one `start` event and then either
//! an `end` or an `end_error` event. The expansion names `tracing` and
//! `kpcompare_core_types`, so calling crates depend on both.

/// Log the start of an operation, with optional extra fields
///
/// ```
/// # use kpcompare_core::log_op_start;
/// log_op_start!("scan_document");
/// log_op_start!("scan_document", strategy = "uuid");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = kpcompare_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use kpcompare_core::log_op_end;
/// log_op_end!("compute_changes", duration_ms = 3, change_count = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = kpcompare_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log the failure of an operation
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError),
/// which supplies the `err.kind` and `err.code` fields.
///
/// ```
/// # use kpcompare_core::{log_op_error, errors::CompareError};
/// let err = CompareError::UnsupportedStrategy { requested: "title".to_string() };
/// log_op_error!("parse_strategy", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = kpcompare_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err,
            $($($field)*)?
        )
    }};
}
