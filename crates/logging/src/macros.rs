//! crates/logging/src/macros.rs
//! Call-site macros for the process-wide logger.
//!
//! Each level macro captures `file!()`, `line!()` and the enclosing function,
//! asks [`LogGlobal::check`](crate::LogGlobal::check) whether the record
//! passes, and only then formats it. A record that is filtered out never
//! evaluates its arguments.

/// Reduces a `type_name` path of a local item to the bare name of the
/// function that contains it.
#[doc(hidden)]
pub fn function_basename(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__here").unwrap_or(path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Name of the enclosing function, without its module path.
///
/// # Example
/// ```
/// fn rotate_now() -> &'static str {
///     logging::function_name!()
/// }
/// assert_eq!(rotate_now(), "rotate_now");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::__function_basename(__type_name_of(__here))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_record {
    ($level:expr, $($arg:tt)+) => {{
        let global = $crate::global();
        let level = $level;
        if global.check(level) {
            global.log(
                level,
                &$crate::Location::new(
                    ::core::file!(),
                    ::core::line!(),
                    $crate::function_name!(),
                ),
                ::core::format_args!($($arg)+),
            );
        }
    }};
}

/// Log a record at [`Level::Trace`](crate::Level::Trace).
///
/// # Example
/// ```ignore
/// trace_log!("polled {} sockets", count);
/// ```
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)+) => {
        $crate::__log_record!($crate::Level::Trace, $($arg)+)
    };
}

/// Log a record at [`Level::Debug`](crate::Level::Debug).
///
/// # Example
/// ```ignore
/// debug_log!("cache miss for {key}");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)+) => {
        $crate::__log_record!($crate::Level::Debug, $($arg)+)
    };
}

/// Log a record at [`Level::Info`](crate::Level::Info).
///
/// # Example
/// ```ignore
/// info_log!("listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)+) => {
        $crate::__log_record!($crate::Level::Info, $($arg)+)
    };
}

/// Log a record at [`Level::Warn`](crate::Level::Warn).
///
/// # Example
/// ```ignore
/// warn_log!("retrying after {} ms", delay);
/// ```
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)+) => {
        $crate::__log_record!($crate::Level::Warn, $($arg)+)
    };
}

/// Log a record at [`Level::Error`](crate::Level::Error).
///
/// # Example
/// ```ignore
/// error_log!("disk {}", "full");
/// ```
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)+) => {
        $crate::__log_record!($crate::Level::Error, $($arg)+)
    };
}

/// Whether a record at `level` would currently be written.
#[macro_export]
macro_rules! log_enabled {
    ($level:expr) => {
        $crate::global().check($level)
    };
}
