//! Operation lifecycle macros
//!
//! Every operation logs one `start` event and then exactly one of `end` or
//! `end_error`. Field names match the `FIELD_*` keys in
//! `chefvault_core_types::schema`. Callers need `tracing` and
//! `chefvault-core-types` in their dependency list.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:ident, $($field:tt)*) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = chefvault_core_types::schema::$event,
            $($field)*
        )
    };
}

/// Log the start of an operation, with optional extra fields
///
/// ```
/// # use chefvault_core::log_op_start;
/// log_op_start!("recipe_create");
/// log_op_start!("recipe_get", recipe_id = 7);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(info, $op, EVENT_START, $($($field)*)?)
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use chefvault_core::log_op_end;
/// log_op_end!("recipe_create", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            info,
            $op,
            EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation; `$err` is anything convertible into `ExError`
///
/// ```
/// # use chefvault_core::log_op_error;
/// # use chefvault_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::NotFound);
/// log_op_error!("recipe_rate", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let failure: $crate::errors::ExError = $err.into();
        $crate::__op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?failure.kind(),
            err_code = failure.code(),
            err_message = failure.message(),
            $($($field)*)?
        )
    }};
}
