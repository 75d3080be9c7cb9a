//! sevlog - severity-filtered console and file logging
//!
//! A [`LogService`] is created once by the application entry point and
//! passed by `&mut` to whatever needs to log. It prints admitted messages to
//! the console, appends them to a per-run default log file and, for mirrored
//! severities, to a dedicated file per severity. Internal failures never
//! reach the caller; they are printed, recorded and flip the health flag.

pub mod config;
pub mod logging;

pub use config::LoggerConfig;
pub use logging::{Finding, HealthFlag, LogService, MirrorSet, Severity};
