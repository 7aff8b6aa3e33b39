//! The boundary between the orchestrator and the units that do the real
//! provisioning work.
//!
//! A collaborator consumes the accumulated stage configuration and
//! signals success with a zero exit status; anything else aborts the
//! whole run. Collaborators are opaque: storage accounts, clusters, job
//! builds and load generators all live behind this seam.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use crate::env::StageEnv;
use crate::error::CollaboratorError;
use crate::runlog::RunLog;
use crate::steps::Step;

/// External collaborators invoked by the stage executor.
pub trait Collaborators {
    /// Invoke a provisioning unit with the accumulated configuration.
    fn invoke(&self, stage: Step, unit: &str, env: &StageEnv) -> Result<(), CollaboratorError>;

    /// Invoke a unit and capture its trimmed stdout. Used for derived
    /// state only a collaborator can resolve.
    fn capture(&self, stage: Step, unit: &str, env: &StageEnv)
        -> Result<String, CollaboratorError>;
}

/// Runs units as child processes from a scripts directory, exporting the
/// stage environment and teeing their output into the run log.
pub struct ProcessCollaborators {
    scripts_dir: PathBuf,
    log: RunLog,
    echo: bool,
}

impl ProcessCollaborators {
    pub fn new(scripts_dir: PathBuf, log: RunLog) -> ProcessCollaborators {
        ProcessCollaborators {
            scripts_dir,
            log,
            echo: true,
        }
    }

    /// Silence console passthrough (`--json` mode); the run log still
    /// receives every line.
    pub fn with_echo(mut self, echo: bool) -> ProcessCollaborators {
        self.echo = echo;
        self
    }

    fn unit_path(&self, unit: &str) -> PathBuf {
        let path = self.scripts_dir.join(unit);
        if path.exists() {
            return path;
        }
        self.scripts_dir.join(format!("{unit}.sh"))
    }

    fn run(&self, stage: Step, unit: &str, env: &StageEnv) -> Result<Output, CollaboratorError> {
        let output = Command::new(self.unit_path(unit))
            .envs(env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CollaboratorError::Spawn {
                stage,
                unit: unit.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().chain(stderr.lines()) {
            self.log.line(line);
            if self.echo {
                println!("  {line}");
            }
        }

        if !output.status.success() {
            return Err(CollaboratorError::Failed {
                stage,
                unit: unit.to_string(),
                status: output.status.code(),
            });
        }
        Ok(output)
    }
}

impl Collaborators for ProcessCollaborators {
    fn invoke(&self, stage: Step, unit: &str, env: &StageEnv) -> Result<(), CollaboratorError> {
        self.run(stage, unit, env).map(|_| ())
    }

    fn capture(
        &self,
        stage: Step,
        unit: &str,
        env: &StageEnv,
    ) -> Result<String, CollaboratorError> {
        let output = self.run(stage, unit, env)?;
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            return Err(CollaboratorError::EmptyCapture {
                stage,
                unit: unit.to_string(),
            });
        }
        Ok(value)
    }
}
