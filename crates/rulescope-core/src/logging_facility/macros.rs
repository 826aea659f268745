//! Operation lifecycle macros
//!
//! Each macro emits one event tagged with the calling module, the operation
//! name and one of the `schema::EVENT_*` values. Extra `name = value` fields
//! are passed straight to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:expr, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::event!(
            $level,
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Mark the start of an operation at INFO
///
/// ```
/// # use rulescope_core::log_op_start;
/// log_op_start!("load_catalog");
/// log_op_start!("fetch", endpoint = "ui/rules");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            tracing::Level::INFO,
            $op,
            $crate::__log_schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Mark the successful end of an operation at INFO
///
/// ```
/// # use rulescope_core::log_op_end;
/// log_op_end!("load_catalog", duration_ms = 42, engines = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            tracing::Level::INFO,
            $op,
            $crate::__log_schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Mark a failed operation at ERROR
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are recorded as `err_kind` and `err_code`.
///
/// ```
/// # use rulescope_core::{log_op_error, errors::RulesError};
/// let err = RulesError::UnknownEngine { engine: "E9".to_string() };
/// log_op_error!("select_engine", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op!(
            tracing::Level::ERROR,
            $op,
            $crate::__log_schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}

/// Record at DEBUG that an operation had nothing to do
///
/// ```
/// # use rulescope_core::log_op_skip;
/// log_op_skip!("select_group", reason = "empty group");
/// ```
#[macro_export]
macro_rules! log_op_skip {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            tracing::Level::DEBUG,
            $op,
            $crate::__log_schema::EVENT_SKIP
            $(, $($field)*)?
        )
    };
}
