//! Time source for timestamps and log file names

use chrono::{Local, NaiveTime};

/// Format for the timestamp inside each line, e.g. `03:04:05 PM`
pub const ENTRY_TIME_FORMAT: &str = "%I:%M:%S %p";

/// Format for the time part of log file names, e.g. `15-04-05`
pub const FILE_TIME_FORMAT: &str = "%H-%M-%S";

/// Supplies the current local time of day
///
/// Returning `None` means the time could not be read; the logger treats it
/// as an internal problem.
pub trait Clock: Send {
    fn now(&self) -> Option<NaiveTime>;
}

/// Wall clock in the local time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Option<NaiveTime> {
        Some(Local::now().time())
    }
}

/// Clock stuck at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// Build from hour, minute and second; `None` if out of range
    pub fn at(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Option<NaiveTime> {
        Some(self.0)
    }
}

/// Render a time for use inside a log line
pub fn entry_timestamp(time: NaiveTime) -> String {
    time.format(ENTRY_TIME_FORMAT).to_string()
}

/// Render a time for use in a log file name
pub fn file_timestamp(time: NaiveTime) -> String {
    time.format(FILE_TIME_FORMAT).to_string()
}
