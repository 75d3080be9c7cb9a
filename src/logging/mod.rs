//! Logging system for sevlog
//!
//! Severity-filtered console output, a default log file per run, and
//! optional per-severity mirror files.

mod clock;
mod console;
mod diagnostics;
mod error;
mod file_writer;
mod macros;
mod mirror;
mod service;
mod severity;

pub use clock::{entry_timestamp, file_timestamp, Clock, FixedClock, SystemClock};
pub use console::{CaptureBuffer, Console};
pub use diagnostics::Finding;
pub use error::{categorize_io_error, describe_io_error, DiskErrorKind, LogError, LogResult};
pub use file_writer::{create_log_file_path, FileSink};
pub use mirror::MirrorSet;
pub use service::{HealthFlag, LogService, LogServiceBuilder};
pub use severity::Severity;
