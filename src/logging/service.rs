//! The log service
//!
//! Filters messages against the console and file thresholds, renders one
//! decorated line per admitted message and routes it to the console, the
//! default log and the per-severity mirror logs. Every failure is reported
//! through [`LogService::report_problem`] and never reaches the caller.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::LoggerConfig;

use super::clock::{entry_timestamp, Clock, SystemClock};
use super::console::Console;
use super::diagnostics::{self, Finding, SinkState};
use super::error::{LogError, LogResult};
use super::file_writer::FileSink;
use super::mirror::MirrorSet;
use super::severity::Severity;

/// Shared view of the logger's health
///
/// Starts healthy and flips to unhealthy on the first internal problem. It
/// never flips back.
#[derive(Debug, Clone)]
pub struct HealthFlag(Arc<AtomicBool>);

impl HealthFlag {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_healthy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn mark_unhealthy(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Builder for [`LogService`]
pub struct LogServiceBuilder {
    config: LoggerConfig,
    console: Option<Console>,
    clock: Option<Box<dyn Clock>>,
}

impl LogServiceBuilder {
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Print console lines and notices to `out` instead of standard output
    pub fn console(mut self, out: impl Write + Send + 'static) -> Self {
        self.console = Some(Console::new(out));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Create the service; see [`LogService::create`]
    pub fn create(self) -> LogService {
        LogService::from_parts(
            self.config,
            self.console.unwrap_or_default(),
            self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        )
    }
}

/// Console and file logger with per-severity mirror files
pub struct LogService {
    console_threshold: Severity,
    file_threshold: Severity,
    mirrored: MirrorSet,
    /// `None` when it could not be opened at creation, or after shutdown
    default_sink: Option<FileSink>,
    /// Mirror logs in `Severity::MESSAGE_LEVELS` order
    dedicated: [Option<FileSink>; 4],
    health: HealthFlag,
    log_dir: PathBuf,
    max_line_length: usize,
    console: Console,
    clock: Box<dyn Clock>,
}

impl LogService {
    /// Create a service writing to standard output and the local clock
    ///
    /// Opens the default log eagerly and then applies the thresholds and
    /// mirror set from `config`. Never fails: problems are reported and the
    /// service degrades to console-only output.
    pub fn create(config: LoggerConfig) -> Self {
        Self::builder().config(config).create()
    }

    pub fn builder() -> LogServiceBuilder {
        LogServiceBuilder {
            config: LoggerConfig::default(),
            console: None,
            clock: None,
        }
    }

    fn from_parts(config: LoggerConfig, console: Console, clock: Box<dyn Clock>) -> Self {
        let mut service = Self {
            console_threshold: Severity::Warning,
            file_threshold: Severity::Information,
            mirrored: MirrorSet::empty(),
            default_sink: None,
            dedicated: Default::default(),
            health: HealthFlag::new(),
            log_dir: config.log_dir,
            max_line_length: config.max_line_length,
            console,
            clock,
        };

        match service.open_sink(Severity::None) {
            Ok(sink) => service.default_sink = Some(sink),
            Err(e) => service.report_problem("create", &e),
        }

        service.apply_configuration(config.console_level, config.file_level, config.mirrored);
        service
    }

    /// Log a message
    ///
    /// `caller` names the code that produced the message; the macros pass
    /// `module_path!()`. Messages no sink would accept are dropped before any
    /// formatting happens.
    pub fn log(&mut self, severity: Severity, caller: &str, message: fmt::Arguments<'_>) {
        if !self.is_admitted(severity) {
            return;
        }

        let line = match self.render(severity, caller, message) {
            Ok(line) => line,
            Err(e) => {
                self.report_problem(caller, &e);
                return;
            }
        };

        if severity.admitted_by(self.console_threshold) {
            self.console.write_line(&line);
        }

        if severity.admitted_by(self.file_threshold) || self.mirrored.contains(severity) {
            self.route_to_files(severity, &line);
        }
    }

    fn is_admitted(&self, severity: Severity) -> bool {
        severity.admitted_by(self.console_threshold)
            || severity.admitted_by(self.file_threshold)
            || self.mirrored.contains(severity)
    }

    fn render(&self, severity: Severity, caller: &str, message: fmt::Arguments<'_>) -> LogResult<String> {
        let tag = severity.tag().ok_or(LogError::NoneSeverity)?;
        let time = self.clock.now().ok_or(LogError::Clock)?;

        let line = format!(
            "{}: {} (Timestamp: {}) - {}\n",
            tag,
            caller,
            entry_timestamp(time),
            message
        );

        if line.len() > self.max_line_length {
            return Err(LogError::LineTooLong {
                len: line.len(),
                max: self.max_line_length,
            });
        }
        Ok(line)
    }

    fn route_to_files(&mut self, severity: Severity, line: &str) {
        if severity.admitted_by(self.file_threshold) {
            let result = match self.default_sink.as_mut() {
                Some(sink) => sink.append(line),
                None => Err(LogError::DefaultSinkMissing),
            };
            if let Err(e) = result {
                self.report_problem("route_to_files", &e);
            }
        }

        if self.mirrored.contains(severity) {
            let sink = severity
                .slot()
                .and_then(|slot| self.dedicated[slot].as_mut());
            let result = match sink {
                Some(sink) => sink.append(line),
                None => Err(LogError::DedicatedSinkMissing(severity)),
            };
            if let Err(e) = result {
                self.report_problem("route_to_files", &e);
            }
        }
    }

    /// Report a malfunction of the logger itself
    ///
    /// Marks the service unhealthy, prints the diagnostic straight to the
    /// console and copies it into the default log when possible. Must not
    /// call back into [`LogService::log`].
    fn report_problem(&mut self, context: &str, error: &LogError) {
        self.health.mark_unhealthy();
        tracing::error!(context, error = %error, "logger internal problem");

        let diagnostic = format!("[LOGGER ERROR]: {} - {}\n", context, error);
        self.console.write_line(&diagnostic);

        match self.default_sink.as_mut() {
            Some(sink) => {
                let written =
                    diagnostic.len() <= self.max_line_length && sink.append(&diagnostic).is_ok();
                if !written {
                    self.console
                        .notice("Couldn't write the diagnostic to the default log.");
                }
            }
            None => self
                .console
                .notice("Default log is not open; the diagnostic was only printed."),
        }
    }

    /// Replace both thresholds and the mirror set
    ///
    /// Mirror logs for severities leaving the set are closed; mirror logs for
    /// severities entering it are opened right away.
    pub fn set_configuration(
        &mut self,
        console_level: Severity,
        file_level: Severity,
        mirrored: MirrorSet,
    ) {
        self.console.notice(&format!(
            "Console log filter set to {}. File log filter set to {}.",
            console_level, file_level
        ));
        self.apply_configuration(console_level, file_level, mirrored);
    }

    /// [`LogService::set_configuration`] from raw level and mask values
    ///
    /// All three values are validated before anything changes; one bad value
    /// leaves the whole configuration untouched.
    pub fn set_configuration_raw(&mut self, console_level: u32, file_level: u32, mirror_mask: u32) {
        match parse_raw_configuration(console_level, file_level, mirror_mask) {
            Ok((console, file, mirrored)) => self.set_configuration(console, file, mirrored),
            Err(e) => self.report_problem("set_configuration", &e),
        }
    }

    fn apply_configuration(&mut self, console_level: Severity, file_level: Severity, mirrored: MirrorSet) {
        self.console_threshold = console_level;
        self.file_threshold = file_level;
        self.mirrored = mirrored;
        tracing::debug!(
            console = %console_level,
            file = %file_level,
            mirrored = %mirrored,
            "log configuration applied"
        );

        for (slot, severity) in Severity::MESSAGE_LEVELS.into_iter().enumerate() {
            if !mirrored.contains(severity) {
                self.dedicated[slot] = None;
            } else if self.dedicated[slot].is_none() {
                match self.open_sink(severity) {
                    Ok(sink) => self.dedicated[slot] = Some(sink),
                    Err(e) => self.report_problem("set_configuration", &e),
                }
            }
        }
    }

    fn open_sink(&self, severity: Severity) -> LogResult<FileSink> {
        let time = self.clock.now().ok_or(LogError::Clock)?;
        FileSink::open(&self.log_dir, severity, time)
    }

    /// `false` once any internal problem has been reported
    pub fn status(&self) -> bool {
        self.health.is_healthy()
    }

    /// Handle to the health flag that outlives borrows of the service
    pub fn health_flag(&self) -> HealthFlag {
        self.health.clone()
    }

    /// Check sinks against the mirror set
    ///
    /// Every finding except [`Finding::PreviouslyUnhealthy`] is reported as an
    /// internal problem. `verbose` prints each step to the console.
    pub fn run_self_test(&mut self, verbose: bool) -> Vec<Finding> {
        let state = SinkState {
            default_open: self.default_sink.is_some(),
            dedicated_open: std::array::from_fn(|slot| self.dedicated[slot].is_some()),
            mirrored: self.mirrored,
            healthy: self.status(),
        };

        if verbose {
            self.console.notice(&format!(
                "Self-test: console filter {}, file filter {}, mirrored {}.",
                self.console_threshold, self.file_threshold, self.mirrored
            ));
        }

        let findings = diagnostics::check(&state);
        for finding in &findings {
            if verbose {
                self.console.notice(&format!("Self-test: {}.", finding));
            }
            if *finding != Finding::PreviouslyUnhealthy {
                self.report_problem("self_test", &LogError::SelfTest(*finding));
            }
        }

        if verbose {
            self.console.notice(&format!(
                "Self-test finished with {} finding(s).",
                findings.len()
            ));
        }
        findings
    }

    pub fn console_threshold(&self) -> Severity {
        self.console_threshold
    }

    pub fn file_threshold(&self) -> Severity {
        self.file_threshold
    }

    pub fn mirrored(&self) -> MirrorSet {
        self.mirrored
    }

    /// Path of the default log, if it is open
    pub fn default_log_path(&self) -> Option<&Path> {
        self.default_sink.as_ref().map(FileSink::path)
    }

    /// Path of the mirror log for `severity`, if it is open
    pub fn mirror_log_path(&self, severity: Severity) -> Option<&Path> {
        severity
            .slot()
            .and_then(|slot| self.dedicated[slot].as_ref())
            .map(FileSink::path)
    }

    /// Close every open log: default, error, warning, information, verbose
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(sink) = self.default_sink.take() {
            self.console.notice("Closing default log handle.");
            drop(sink);
        }

        for (slot, severity) in Severity::MESSAGE_LEVELS.into_iter().enumerate() {
            if let Some(sink) = self.dedicated[slot].take() {
                self.console
                    .notice(&format!("Closing {} log handle.", severity.sink_name()));
                drop(sink);
            }
        }
    }

    /// Close everything and consume the service
    pub fn destroy(mut self) {
        self.shutdown();
    }
}

impl Drop for LogService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for LogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogService")
            .field("console_threshold", &self.console_threshold)
            .field("file_threshold", &self.file_threshold)
            .field("mirrored", &self.mirrored)
            .field("default_sink", &self.default_sink)
            .field("dedicated", &self.dedicated)
            .field("healthy", &self.status())
            .field("log_dir", &self.log_dir)
            .finish_non_exhaustive()
    }
}

fn parse_raw_configuration(
    console_level: u32,
    file_level: u32,
    mirror_mask: u32,
) -> LogResult<(Severity, Severity, MirrorSet)> {
    let console = Severity::from_bits(console_level)?;
    let file = Severity::from_bits(file_level)?;
    let mirrored = MirrorSet::from_bits(mirror_mask)?;
    Ok((console, file, mirrored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{CaptureBuffer, FixedClock};
    use chrono::NaiveTime;
    use std::fs;
    use tempfile::TempDir;

    const ERROR_LINE: &str = "[ERROR]: main (Timestamp: 03:04:05 PM) - disk failure: 42\n";

    struct FailingClock;

    impl Clock for FailingClock {
        fn now(&self) -> Option<NaiveTime> {
            None
        }
    }

    struct Harness {
        service: LogService,
        console: CaptureBuffer,
        dir: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self::with(|_| {})
        }

        fn with(adjust: impl FnOnce(&mut LoggerConfig)) -> Self {
            let dir = TempDir::new().unwrap();
            let console = CaptureBuffer::new();
            let mut config = LoggerConfig::with_log_dir(dir.path().join("Logs"));
            adjust(&mut config);

            let service = LogService::builder()
                .config(config)
                .console(console.clone())
                .clock(FixedClock::at(15, 4, 5).unwrap())
                .create();
            Self {
                service,
                console,
                dir,
            }
        }

        fn logs_dir(&self) -> PathBuf {
            self.dir.path().join("Logs")
        }

        fn read(&self, name: &str) -> String {
            fs::read_to_string(self.logs_dir().join(name)).unwrap_or_default()
        }

        fn default_log(&self) -> String {
            self.read("DefaultLog-15-04-05.txt")
        }
    }

    #[test]
    fn test_create_opens_default_log() {
        let h = Harness::new();
        assert!(h.service.status());
        assert_eq!(
            h.service.default_log_path(),
            Some(h.logs_dir().join("DefaultLog-15-04-05.txt").as_path())
        );
        assert_eq!(h.service.console_threshold(), Severity::Warning);
        assert_eq!(h.service.file_threshold(), Severity::Information);
        assert!(h.service.mirrored().is_empty());
        assert!(h.console.contents().is_empty());
    }

    #[test]
    fn test_error_goes_to_console_and_default_log() {
        let mut h = Harness::new();
        h.service
            .log(Severity::Error, "main", format_args!("disk failure: {}", 42));

        assert_eq!(h.console.contents(), ERROR_LINE);
        assert_eq!(h.default_log(), ERROR_LINE);
        assert!(h.service.status());
    }

    #[test]
    fn test_information_goes_to_file_only() {
        let mut h = Harness::new();
        h.service
            .log(Severity::Information, "loader", format_args!("loaded {} items", 3));

        assert!(h.console.contents().is_empty());
        assert_eq!(
            h.default_log(),
            "[INFORMATION]: loader (Timestamp: 03:04:05 PM) - loaded 3 items\n"
        );
    }

    #[test]
    fn test_filtered_message_has_no_effect() {
        let mut h = Harness::new();
        h.service.log(Severity::Verbose, "x", format_args!("msg"));

        assert!(h.console.contents().is_empty());
        assert!(h.default_log().is_empty());
        assert!(h.service.status());
    }

    #[test]
    fn test_filtered_message_skips_rendering() {
        // The clock would fail, so any formatting attempt would be reported
        let dir = TempDir::new().unwrap();
        let console = CaptureBuffer::new();
        let mut service = LogService::builder()
            .config(LoggerConfig::with_log_dir(dir.path()))
            .console(console.clone())
            .clock(FailingClock)
            .create();
        service.set_configuration(Severity::None, Severity::None, MirrorSet::empty());
        console.clear();

        service.log(Severity::Verbose, "x", format_args!("msg"));
        assert!(console.contents().is_empty());
    }

    #[test]
    fn test_one_console_line_per_call() {
        let mut h = Harness::new();
        h.service.log(Severity::Warning, "a", format_args!("first"));
        h.service.log(Severity::Error, "b", format_args!("second"));

        let lines = h.console.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[WARNING]: a (Timestamp: 03:04:05 PM) - first");
        assert_eq!(lines[1], "[ERROR]: b (Timestamp: 03:04:05 PM) - second");
    }

    #[test]
    fn test_positional_arguments() {
        let mut h = Harness::new();
        h.service
            .log(Severity::Error, "main", format_args!("{1} before {0}", "b", "a"));
        assert!(h.console.contents().ends_with("- a before b\n"));
    }

    #[test]
    fn test_mirrored_verbose_goes_to_its_own_log_only() {
        let mut h = Harness::new();
        h.service.set_configuration(
            Severity::None,
            Severity::None,
            MirrorSet::empty().with(Severity::Verbose),
        );
        assert_eq!(
            h.console.contents(),
            "[SYSTEM]: Console log filter set to LOG_LEVEL_NONE. \
             File log filter set to LOG_LEVEL_NONE.\n"
        );
        h.console.clear();

        h.service.log(Severity::Verbose, "worker", format_args!("tick"));

        assert!(h.console.contents().is_empty());
        assert!(h.default_log().is_empty());
        assert_eq!(
            h.read("VerboseLog-15-04-05.txt"),
            "[VERBOSE]: worker (Timestamp: 03:04:05 PM) - tick\n"
        );
        assert!(h.service.status());
    }

    #[test]
    fn test_mirrored_and_threshold_write_both_files() {
        let mut h = Harness::new();
        h.service.set_configuration(
            Severity::None,
            Severity::Information,
            MirrorSet::empty().with(Severity::Error),
        );
        h.service
            .log(Severity::Error, "main", format_args!("disk failure: {}", 42));

        assert_eq!(h.default_log(), ERROR_LINE);
        assert_eq!(h.read("ErrorLog-15-04-05.txt"), ERROR_LINE);
    }

    #[test]
    fn test_clearing_mirror_closes_its_log() {
        let mut h = Harness::new();
        let warning_only = MirrorSet::empty().with(Severity::Warning);
        h.service
            .set_configuration(Severity::Warning, Severity::Information, warning_only);
        assert!(h.service.mirror_log_path(Severity::Warning).is_some());

        h.service
            .set_configuration(Severity::Warning, Severity::Information, MirrorSet::empty());
        assert!(h.service.mirror_log_path(Severity::Warning).is_none());
        assert!(h.service.run_self_test(false).is_empty());
        assert!(h.service.status());
    }

    #[test]
    fn test_mirror_from_config_opens_at_creation() {
        let h = Harness::with(|config| {
            config.mirrored = MirrorSet::empty().with(Severity::Error);
        });
        assert_eq!(
            h.service.mirror_log_path(Severity::Error),
            Some(h.logs_dir().join("ErrorLog-15-04-05.txt").as_path())
        );
        // Applying the initial configuration prints no notice
        assert!(h.console.contents().is_empty());
    }

    #[test]
    fn test_configuration_round_trip() {
        let mut h = Harness::new();
        h.service.set_configuration_raw(0x2, 0x4, 0x8);

        assert_eq!(h.service.console_threshold(), Severity::Warning);
        assert_eq!(h.service.file_threshold(), Severity::Information);
        assert_eq!(h.service.mirrored().bits(), 0x8);
        assert!(h.service.status());
    }

    #[test]
    fn test_invalid_level_leaves_configuration_unchanged() {
        let mut h = Harness::new();
        h.service.set_configuration_raw(16, 0x8, 0x0);

        assert_eq!(h.service.console_threshold(), Severity::Warning);
        assert_eq!(h.service.file_threshold(), Severity::Information);
        assert!(!h.service.status());
        assert!(h
            .console
            .contents()
            .contains("[LOGGER ERROR]: set_configuration - Invalid log level specified: 16"));
        assert!(h.default_log().contains("Invalid log level specified: 16"));
    }

    #[test]
    fn test_invalid_mask_is_atomic() {
        let mut h = Harness::new();
        h.service.set_configuration_raw(0x8, 0x8, 0x10);

        assert_eq!(h.service.console_threshold(), Severity::Warning);
        assert_eq!(h.service.file_threshold(), Severity::Information);
        assert!(h.service.mirrored().is_empty());
        assert!(!h.service.status());
        assert!(h
            .console
            .contents()
            .contains("Mirror logs set to an invalid value 0x10"));
    }

    #[test]
    fn test_none_severity_is_an_internal_problem() {
        let mut h = Harness::new();
        h.service.log(Severity::None, "main", format_args!("nothing"));

        assert!(!h.service.status());
        let console = h.console.contents();
        assert!(console.contains("[LOGGER ERROR]: main - LOG_LEVEL_NONE cannot be used"));
        assert!(!console.contains("nothing"));
    }

    #[test]
    fn test_line_too_long_suppresses_output() {
        let mut h = Harness::new();
        let long = "x".repeat(600);
        h.service.log(Severity::Error, "main", format_args!("{}", long));

        assert!(!h.service.status());
        assert!(!h.console.contents().contains(&long));
        assert!(!h.default_log().contains(&long));
        // The diagnostic itself fits and lands in the default log
        assert!(h.default_log().contains("exceeds the 512 byte limit"));
    }

    #[test]
    fn test_oversized_diagnostic_falls_back_to_console() {
        let mut h = Harness::with(|config| config.max_line_length = 80);
        h.service
            .log(Severity::Error, "main", format_args!("{}", "y".repeat(100)));

        assert!(h.default_log().is_empty());
        let console = h.console.contents();
        assert!(console.contains("exceeds the 80 byte limit"));
        assert!(console.contains("[SYSTEM]: Couldn't write the diagnostic to the default log."));
    }

    #[test]
    fn test_clock_failure_degrades_without_panic() {
        let dir = TempDir::new().unwrap();
        let console = CaptureBuffer::new();
        let mut service = LogService::builder()
            .config(LoggerConfig::with_log_dir(dir.path()))
            .console(console.clone())
            .clock(FailingClock)
            .create();

        assert!(!service.status());
        assert!(service.default_log_path().is_none());

        service.log(Severity::Error, "main", format_args!("lost"));
        let console = console.contents();
        assert!(console.contains("Unable to generate current time as a string"));
        assert!(!console.contains("lost"));
    }

    #[test]
    fn test_unusable_log_dir_keeps_console_output() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let console = CaptureBuffer::new();
        let mut service = LogService::builder()
            .config(LoggerConfig::with_log_dir(blocker.join("Logs")))
            .console(console.clone())
            .clock(FixedClock::at(15, 4, 5).unwrap())
            .create();
        assert!(!service.status());
        assert!(service.default_log_path().is_none());
        console.clear();

        service
            .log(Severity::Error, "main", format_args!("disk failure: {}", 42));
        let output = console.contents();
        assert!(output.starts_with(ERROR_LINE));
        assert!(output.contains("Default log has not been initialized or has already been closed"));
        assert!(output.contains("[SYSTEM]: Default log is not open; the diagnostic was only printed."));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_mirror_log_is_reported() {
        let mut h = Harness::new();
        let health = h.service.health_flag();

        // Replace the log directory with a file so the mirror log cannot open
        fs::remove_dir_all(h.logs_dir()).unwrap();
        fs::write(h.logs_dir(), b"").unwrap();

        h.service.set_configuration(
            Severity::None,
            Severity::None,
            MirrorSet::empty().with(Severity::Verbose),
        );
        assert!(h.service.mirror_log_path(Severity::Verbose).is_none());
        h.console.clear();

        h.service.log(Severity::Verbose, "x", format_args!("msg"));
        assert!(!health.is_healthy());
        assert!(h
            .console
            .contents()
            .contains("Verbose log has not been initialized or has already been closed"));

        assert_eq!(
            h.service.run_self_test(false),
            vec![
                Finding::PreviouslyUnhealthy,
                Finding::MirroredSinkMissing(Severity::Verbose)
            ]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_default_write_still_reaches_mirror_log() {
        let mut h = Harness::with(|config| {
            config.mirrored = MirrorSet::empty().with(Severity::Error);
        });
        h.service.default_sink = Some(FileSink::open_path(PathBuf::from("/dev/full")).unwrap());

        h.service
            .log(Severity::Error, "main", format_args!("disk failure: {}", 42));

        assert!(!h.service.status());
        let console = h.console.contents();
        assert!(console.starts_with(ERROR_LINE));
        assert!(console.contains("[LOGGER ERROR]: route_to_files - Unable to write to /dev/full"));
        assert!(console.contains("[SYSTEM]: Couldn't write the diagnostic to the default log."));
        assert_eq!(h.read("ErrorLog-15-04-05.txt"), ERROR_LINE);
    }

    #[test]
    fn test_log_after_shutdown_reports_closed_default_log() {
        let mut h = Harness::new();
        h.service.shutdown();
        h.console.clear();

        h.service.log(Severity::Information, "main", format_args!("late"));

        assert!(!h.service.status());
        let console = h.console.contents();
        assert!(console.contains(
            "[LOGGER ERROR]: route_to_files - Default log has not been initialized or has already been closed"
        ));
        assert!(!h.default_log().contains("late"));
    }

    #[test]
    fn test_self_test_verbose_prints_summary() {
        let mut h = Harness::new();
        let findings = h.service.run_self_test(true);

        assert!(findings.is_empty());
        assert!(h.service.status());
        let lines = h.console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[SYSTEM]: Self-test: console filter LOG_LEVEL_WARNING"));
        assert_eq!(lines[1], "[SYSTEM]: Self-test finished with 0 finding(s).");
    }

    #[test]
    fn test_shutdown_closes_in_order_and_is_idempotent() {
        let mut h = Harness::with(|config| {
            config.mirrored = MirrorSet::from_bits(0x9).unwrap();
        });
        h.service.shutdown();
        assert_eq!(
            h.console.lines(),
            vec![
                "[SYSTEM]: Closing default log handle.",
                "[SYSTEM]: Closing error log handle.",
                "[SYSTEM]: Closing verbose log handle.",
            ]
        );
        assert!(h.service.default_log_path().is_none());

        h.console.clear();
        h.service.shutdown();
        assert!(h.console.contents().is_empty());
    }

    #[test]
    fn test_destroy_closes_everything_once() {
        let h = Harness::new();
        let console = h.console.clone();
        h.service.destroy();
        assert_eq!(console.lines(), vec!["[SYSTEM]: Closing default log handle."]);
    }

    #[test]
    fn test_health_flag_clone_tracks_service() {
        let mut h = Harness::new();
        let health = h.service.health_flag();
        assert!(health.is_healthy());

        h.service.set_configuration_raw(3, 0, 0);
        assert!(!health.is_healthy());
        assert!(!h.service.status());
    }

    #[test]
    fn test_macros_use_module_path() {
        let mut h = Harness::new();
        crate::log_error!(h.service, "disk failure: {}", 42);
        crate::log_verbose!(h.service, "dropped");

        assert_eq!(
            h.console.contents(),
            "[ERROR]: sevlog::logging::service::tests (Timestamp: 03:04:05 PM) - disk failure: 42\n"
        );
    }
}
