//! Severity levels
//!
//! A severity is both a verbosity rank (used by thresholds) and a single bit
//! (used by the mirror set).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LogError;

/// Message severity, ordered from least to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Threshold only: nothing passes. Never a message severity.
    None = 0x0,
    Error = 0x1,
    Warning = 0x2,
    Information = 0x4,
    Verbose = 0x8,
}

impl Severity {
    /// The four severities a message can carry, in mirror order
    pub const MESSAGE_LEVELS: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Information,
        Severity::Verbose,
    ];

    /// Parse a raw level value, accepting only the five defined values
    pub fn from_bits(bits: u32) -> Result<Self, LogError> {
        match bits {
            0x0 => Ok(Severity::None),
            0x1 => Ok(Severity::Error),
            0x2 => Ok(Severity::Warning),
            0x4 => Ok(Severity::Information),
            0x8 => Ok(Severity::Verbose),
            other => Err(LogError::InvalidSeverity(other)),
        }
    }

    /// Raw bit value
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Whether a message of this severity passes a sink set to `threshold`
    pub fn admitted_by(self, threshold: Severity) -> bool {
        self <= threshold
    }

    /// Tag printed at the start of each line, `None` has no tag
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Severity::None => None,
            Severity::Error => Some("[ERROR]"),
            Severity::Warning => Some("[WARNING]"),
            Severity::Information => Some("[INFORMATION]"),
            Severity::Verbose => Some("[VERBOSE]"),
        }
    }

    /// Prefix for the log file owned by this severity
    ///
    /// `None` names the default log.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Severity::None => "DefaultLog",
            Severity::Error => "ErrorLog",
            Severity::Warning => "WarningLog",
            Severity::Information => "InformationLog",
            Severity::Verbose => "VerboseLog",
        }
    }

    /// Lowercase word used in lifecycle notices ("Closing error log handle.")
    pub fn sink_name(self) -> &'static str {
        match self {
            Severity::None => "default",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
            Severity::Verbose => "verbose",
        }
    }

    /// Slot of this severity among the dedicated sinks
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Severity::None => None,
            Severity::Error => Some(0),
            Severity::Warning => Some(1),
            Severity::Information => Some(2),
            Severity::Verbose => Some(3),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::None => "LOG_LEVEL_NONE",
            Severity::Error => "LOG_LEVEL_ERROR",
            Severity::Warning => "LOG_LEVEL_WARNING",
            Severity::Information => "LOG_LEVEL_INFORMATION",
            Severity::Verbose => "LOG_LEVEL_VERBOSE",
        };
        f.write_str(name)
    }
}
