use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Isolated working directory for one binary invocation. The run log is
/// written relative to the working directory, so each test sees only its
/// own artifacts.
pub struct TestEnv {
    pub work_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> TestEnv {
        TestEnv {
            work_dir: TempDir::new().unwrap(),
        }
    }

    /// Run the streambench binary with the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    /// Run with PATH overridden, to control which tools preflight sees.
    pub fn run_with_path(&self, args: &[&str], path: &Path) -> Output {
        self.command(args).env("PATH", path).output().unwrap()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_streambench"));
        command
            .args(args)
            .current_dir(self.work_dir.path())
            .env_remove("STREAMBENCH_CLIENT_ID")
            .env_remove("STREAMBENCH_CLIENT_SECRET");
        command
    }

    pub fn log_exists(&self) -> bool {
        self.work_dir.path().join("streambench.log").exists()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
