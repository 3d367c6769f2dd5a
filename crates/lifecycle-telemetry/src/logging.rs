//! Structured event helpers.
//!
//! Lifecycle events carry the same `namespace` and `sequence` fields so they
//! can be filtered together regardless of which operation emitted them.

/// Log a lifecycle event with standard fields.
///
/// ```rust,ignore
/// log_lifecycle_event!(info, "Definition committed", "mycc", 3, approvals = 2);
/// ```
#[macro_export]
macro_rules! log_lifecycle_event {
    ($level:ident, $msg:expr, $namespace:expr, $sequence:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            namespace = %$namespace,
            sequence = $sequence,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an install event with standard fields.
#[macro_export]
macro_rules! log_install_event {
    ($level:ident, $msg:expr, $package_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            package_id = %$package_id,
            $($($field)*,)?
            $msg
        )
    };
}
