//! Log file sinks
//!
//! Names log files after their severity and the time they were opened, and
//! owns the open file handles.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;

use super::clock::file_timestamp;
use super::error::{LogError, LogResult};
use super::severity::Severity;

/// Generate a timestamped log file path
///
/// `Severity::None` names the default log, e.g. `Logs/DefaultLog-15-04-05.txt`.
pub fn create_log_file_path(logs_dir: &Path, severity: Severity, time: NaiveTime) -> PathBuf {
    logs_dir.join(format!(
        "{}-{}.txt",
        severity.file_prefix(),
        file_timestamp(time)
    ))
}

/// An open, exclusively owned log file
///
/// Dropping the sink closes the file.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Create `logs_dir` if needed and open a log file in it for appending
    pub fn open(logs_dir: &Path, severity: Severity, time: NaiveTime) -> LogResult<Self> {
        fs::create_dir_all(logs_dir).map_err(|source| LogError::CreateDirectory {
            path: logs_dir.to_path_buf(),
            source,
        })?;

        let path = create_log_file_path(logs_dir, severity, time);
        Self::open_path(path)
    }

    /// Open a specific file for appending
    pub fn open_path(path: PathBuf) -> LogResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::OpenSink {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Opened log file {}", path.display());
        Ok(Self { file, path })
    }

    /// Append text and flush it to the file
    pub fn append(&mut self, text: &str) -> LogResult<()> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.file.flush();
        tracing::debug!("Closed log file {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 9).unwrap()
    }

    #[test]
    fn test_create_log_file_path() {
        let logs_dir = PathBuf::from("Logs");
        let path = create_log_file_path(&logs_dir, Severity::None, noon());
        assert_eq!(path, PathBuf::from("Logs/DefaultLog-12-05-09.txt"));

        let path = create_log_file_path(&logs_dir, Severity::Warning, noon());
        assert_eq!(path, PathBuf::from("Logs/WarningLog-12-05-09.txt"));
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let logs_dir = temp_dir.path().join("nested").join("Logs");

        let sink = FileSink::open(&logs_dir, Severity::Error, noon()).unwrap();
        assert!(logs_dir.is_dir());
        assert_eq!(sink.path(), logs_dir.join("ErrorLog-12-05-09.txt"));
        assert!(sink.path().exists());
    }

    #[test]
    fn test_append_writes_and_appends() {
        let temp_dir = TempDir::new().unwrap();

        let mut sink = FileSink::open(temp_dir.path(), Severity::None, noon()).unwrap();
        sink.append("one\n").unwrap();
        let path = sink.path().to_path_buf();
        drop(sink);

        // Reopening the same name appends rather than truncates
        let mut sink = FileSink::open(temp_dir.path(), Severity::None, noon()).unwrap();
        sink.append("two\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_open_fails_when_directory_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        File::create(&blocker).unwrap();

        let err = FileSink::open(&blocker.join("Logs"), Severity::None, noon()).unwrap_err();
        assert!(matches!(err, LogError::CreateDirectory { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_append_to_full_device_fails() {
        let mut sink = FileSink::open_path(PathBuf::from("/dev/full")).unwrap();
        let err = sink.append("lost\n").unwrap_err();

        assert!(matches!(err, LogError::Write { ref path, .. } if path == Path::new("/dev/full")));
        assert!(err.to_string().contains("disk full"));
    }
}
