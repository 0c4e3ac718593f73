//! Operation logging macros
//!
//! Each macro takes the operation name first and an optional tail of extra
//! `tracing` fields (`table = ...`, `record_id = ...`).

/// Log the start of an operation
///
/// ```
/// # use picole_core::log_op_start;
/// log_op_start!("sabor_insert");
/// log_op_start!("sabor_insert", table = "sabor");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use picole_core::log_op_end;
/// log_op_end!("sabor_insert", duration_ms = 3_u64, table = "sabor");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation with its stable error code
///
/// `$err` is anything convertible into `ExError`.
///
/// ```
/// # use picole_core::{log_op_error, errors::PicoleError};
/// let err = PicoleError::NotFound { entity: "Lote", id: 1 };
/// log_op_error!("lote_update", err, duration_ms = 10_u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)*)?
        )
    }};
}
