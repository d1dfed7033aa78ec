//! Operation bracketing macros
//!
//! Selection and chain operations emit one `start` event on entry and exactly
//! one of `end` or `end_error` on exit. Each macro takes the operation name
//! first and passes any trailing `tracing` fields through unchanged, so
//! `node_path = ...`, `kind = ?k` and `error = %e` all work.

/// Emit the `start` event for `$op`
///
/// ```
/// # use varsetx_core::log_op_start;
/// log_op_start!("select_node");
/// log_op_start!("select_node", node_path = "/World/chair");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Emit the `end` event for `$op`; `duration_ms` is required
///
/// ```
/// # use varsetx_core::log_op_end;
/// log_op_end!("reset_chain", duration_ms = 3, removed_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Emit the `end_error` event for `$op`
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are recorded as `err_kind` and `err_code`.
///
/// ```
/// # use varsetx_core::{log_op_error, errors::VarsetXError};
/// log_op_error!(
///     "apply_selection",
///     VarsetXError::NoAttachmentPoint,
///     duration_ms = 1,
///     node_path = "/A"
/// );
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($($field)*)?
        );
    }};
}
