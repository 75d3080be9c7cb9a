//! Self-test findings
//!
//! The checks compare which dedicated sinks are open against the mirror set.

use std::fmt;

use super::mirror::MirrorSet;
use super::severity::Severity;

/// An inconsistency found by the self test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    /// The default log file is not open
    DefaultSinkMissing,
    /// Severity is mirrored but its log file is not open
    MirroredSinkMissing(Severity),
    /// Log file is open for a severity that is not mirrored
    StraySink(Severity),
    /// The health flag was already down before the test ran
    PreviouslyUnhealthy,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::DefaultSinkMissing => write!(f, "default log is not open"),
            Finding::MirroredSinkMissing(s) => {
                write!(f, "{} is mirrored but its log is not open", s)
            }
            Finding::StraySink(s) => write!(f, "{} log is open but not mirrored", s),
            Finding::PreviouslyUnhealthy => write!(f, "logger was already unhealthy"),
        }
    }
}

/// Snapshot of sink state the checks run against
#[derive(Debug, Clone, Copy)]
pub(crate) struct SinkState {
    pub default_open: bool,
    /// Open flags in `Severity::MESSAGE_LEVELS` order
    pub dedicated_open: [bool; 4],
    pub mirrored: MirrorSet,
    pub healthy: bool,
}

/// Run every consistency check, returning findings in check order
pub(crate) fn check(state: &SinkState) -> Vec<Finding> {
    let mut findings = Vec::new();

    if !state.healthy {
        findings.push(Finding::PreviouslyUnhealthy);
    }

    if !state.default_open {
        findings.push(Finding::DefaultSinkMissing);
    }

    for (severity, open) in Severity::MESSAGE_LEVELS
        .into_iter()
        .zip(state.dedicated_open)
    {
        match (state.mirrored.contains(severity), open) {
            (true, false) => findings.push(Finding::MirroredSinkMissing(severity)),
            (false, true) => findings.push(Finding::StraySink(severity)),
            _ => {}
        }
    }

    findings
}
