//! Logger error types
//!
//! None of these ever reach a caller of the public logging operations. They
//! are routed to the internal-problem report instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::diagnostics::Finding;
use super::severity::Severity;

/// Things that can go wrong inside the logger
#[derive(Error, Debug)]
pub enum LogError {
    /// Raw level value outside the defined set
    #[error("Invalid log level specified: {0}")]
    InvalidSeverity(u32),

    /// A message was submitted with the NONE severity
    #[error("LOG_LEVEL_NONE cannot be used as a message severity")]
    NoneSeverity,

    /// Raw mirror mask with bits beyond the four severities
    #[error("Mirror logs set to an invalid value 0x{0:X}")]
    InvalidMirrorMask(u32),

    /// LOG_LEVEL_NONE listed as a mirrored severity
    #[error("LOG_LEVEL_NONE cannot be mirrored")]
    NoneMirrored,

    #[error("Unable to create log directory {}: {}", .path.display(), describe_io_error(.source))]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to open file {}: {}", .path.display(), describe_io_error(.source))]
    OpenSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write to {}: {}", .path.display(), describe_io_error(.source))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The time source produced nothing
    #[error("Unable to generate current time as a string")]
    Clock,

    /// Rendered line does not fit the configured bound
    #[error("Unable to construct log message: {len} bytes exceeds the {max} byte limit")]
    LineTooLong { len: usize, max: usize },

    #[error("Default log has not been initialized or has already been closed")]
    DefaultSinkMissing,

    #[error("{} log has not been initialized or has already been closed", capitalize(.0.sink_name()))]
    DedicatedSinkMissing(Severity),

    #[error("Self-test failed: {0}")]
    SelfTest(Finding),
}

/// Result alias for logger internals
pub type LogResult<T> = Result<T, LogError>;

/// Categories of disk errors for readable diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    PermissionDenied,
    NotFound,
    Other,
}

impl DiskErrorKind {
    pub fn user_message(&self) -> &'static str {
        match self {
            DiskErrorKind::DiskFull => "disk full",
            DiskErrorKind::PermissionDenied => "permission denied",
            DiskErrorKind::NotFound => "file or directory not found",
            DiskErrorKind::Other => "I/O error",
        }
    }
}

/// errno values for a full disk or exhausted quota (ENOSPC, EDQUOT on macOS and Linux)
const DISK_FULL_ERRNOS: [i32; 3] = [28, 69, 122];

const EACCES: i32 = 13;

/// Categorize an IO error, falling back to the raw errno on Unix
pub fn categorize_io_error(e: &io::Error) -> DiskErrorKind {
    match e.kind() {
        io::ErrorKind::WriteZero => return DiskErrorKind::DiskFull,
        io::ErrorKind::PermissionDenied => return DiskErrorKind::PermissionDenied,
        io::ErrorKind::NotFound => return DiskErrorKind::NotFound,
        _ => {}
    }

    match e.raw_os_error() {
        Some(code) if cfg!(unix) && DISK_FULL_ERRNOS.contains(&code) => DiskErrorKind::DiskFull,
        Some(EACCES) if cfg!(unix) => DiskErrorKind::PermissionDenied,
        _ => DiskErrorKind::Other,
    }
}

/// Short description of an IO error, category first
pub fn describe_io_error(e: &io::Error) -> String {
    match categorize_io_error(e) {
        DiskErrorKind::Other => e.to_string(),
        kind => format!("{} ({})", kind.user_message(), e),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
