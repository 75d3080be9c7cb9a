//! Logging macros
//!
//! Each macro passes `module_path!()` as the caller name and builds the
//! message with `format_args!`, so nothing is allocated for a message that
//! no sink accepts.

/// Log at an explicit severity
///
/// ```rust,no_run
/// use sevlog::{log_at, LogService, LoggerConfig, Severity};
///
/// let mut service = LogService::create(LoggerConfig::default());
/// log_at!(service, Severity::Warning, "retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! log_at {
    ($service:expr, $severity:expr, $($arg:tt)*) => {
        $service.log($severity, module_path!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($service:expr, $($arg:tt)*) => {
        $crate::log_at!($service, $crate::logging::Severity::Error, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($service:expr, $($arg:tt)*) => {
        $crate::log_at!($service, $crate::logging::Severity::Warning, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_information {
    ($service:expr, $($arg:tt)*) => {
        $crate::log_at!($service, $crate::logging::Severity::Information, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($service:expr, $($arg:tt)*) => {
        $crate::log_at!($service, $crate::logging::Severity::Verbose, $($arg)*)
    };
}
