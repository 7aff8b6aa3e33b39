//! The single log artifact for a run.
//!
//! Truncated when the run starts, appended by the orchestrator and by
//! every collaborator for the run's duration. Log writes are
//! best-effort: a failing log write never aborts the benchmark itself.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Local;

/// Default log location, relative to the working directory.
pub const RUN_LOG_PATH: &str = "streambench.log";

/// Shared handle to the run log; clones append to the same file.
#[derive(Clone)]
pub struct RunLog {
    inner: Arc<Mutex<File>>,
    path: PathBuf,
}

impl RunLog {
    /// Create the log file for a fresh run, truncating any previous one.
    pub fn create(path: impl AsRef<Path>) -> io::Result<RunLog> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(RunLog {
            inner: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one raw line (collaborator output passes through here).
    pub fn line(&self, text: &str) {
        let mut file = self.inner.lock().unwrap();
        let _ = writeln!(file, "{text}");
    }

    /// Append a timestamped orchestrator line.
    pub fn header(&self, text: &str) {
        self.line(&format!(
            "[{}] {text}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
    }
}
