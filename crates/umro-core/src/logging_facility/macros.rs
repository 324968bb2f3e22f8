//! Operation lifecycle events.
//!
//! An operation reports `start`, then either `end` or `end_error`. Each event
//! carries `component` (the calling module) and `op`; extra `key = value`
//! fields may follow the required arguments.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Report that `op` has started.
///
/// ```
/// # use umro_core::log_op_start;
/// log_op_start!("parse");
/// log_op_start!("parse", input_len = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            info,
            $op,
            $crate::umro_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Report that `op` finished; `duration_ms` is required.
///
/// ```
/// # use umro_core::log_op_end;
/// log_op_end!("decode", duration_ms = 3, code = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            info,
            $op,
            $crate::umro_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Report that `op` failed with `err` (anything convertible into
/// [`ExError`](crate::errors::ExError)), adding `err.kind` and `err.code`.
///
/// ```
/// # use umro_core::{log_op_error, UmroError};
/// let err = UmroError::NodeNotFound { path: "a/b".to_string() };
/// log_op_error!("get_single_node", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let failure: $crate::errors::ExError = ::core::convert::Into::into($err);
        $crate::__op_event!(
            error,
            $op,
            $crate::umro_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code()
            $(, $($field)*)?
        )
    }};
}
