//! streambench - deployment orchestrator for a streaming-at-scale
//! benchmark.
//!
//! The core is the orchestration engine: resolve run configuration from a
//! throughput tier, derive deterministic resource identifiers from the
//! deployment prefix, decide which of the six stages execute, and drive
//! external collaborators through a flat environment-variable contract.
//! The collaborators themselves (cloud provisioning, job builds, load
//! generators, verification) are opaque executables behind the
//! [`Collaborators`] seam.

pub mod collaborator;
pub mod config;
pub mod env;
pub mod error;
pub mod executor;
pub mod names;
pub mod preflight;
pub mod runlog;
pub mod steps;
pub mod tier;

// Re-exports for convenience
pub use collaborator::{Collaborators, ProcessCollaborators};
pub use config::{DeploymentConfig, DeploymentRequest, JobTopology, Platform, ServicePrincipal};
pub use env::StageEnv;
pub use error::{CollaboratorError, ConfigError, PreflightError};
pub use executor::{RunEvent, StageExecutor};
pub use names::ResourceNames;
pub use runlog::{RunLog, RUN_LOG_PATH};
pub use steps::{Step, StepSet};
pub use tier::{Tier, TierProfile};
