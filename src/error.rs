//! Error types for streambench
//!
//! Three failure classes, each fatal: `ConfigError` (bad user input,
//! surfaces with usage text before any stage runs), `PreflightError`
//! (missing local tooling, surfaces before stage C), and
//! `CollaboratorError` (an external unit failed, the run aborts with its
//! exit status). There is no warning class.

use std::io;

use thiserror::Error;

use crate::steps::Step;

/// Invalid or missing user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The deployment prefix is the namespace root for every resource
    #[error("deployment prefix must not be empty")]
    EmptyPrefix,

    /// Unrecognized tiers never fall back to a default profile
    #[error("unknown throughput tier '{tier}' - expected low|1, medium|5 or high|10")]
    UnknownTier { tier: String },

    #[error("unknown step letter '{letter}' - valid steps are C, I, P, T, M and V")]
    UnknownStep { letter: char },

    /// A derived name breaks its target service's constraint
    #[error("derived {resource} name '{name}' {constraint}")]
    InvalidName {
        resource: &'static str,
        name: String,
        constraint: String,
    },

    #[error("service principal requires both --client-id and --client-secret")]
    IncompleteServicePrincipal,
}

/// A required local tool is not invocable.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreflightError {
    #[error("required tool '{tool}' is not available - install it and re-run")]
    MissingTool { tool: String },
}

/// An external collaborator failed. Carries the originating stage and
/// unit so the failure's origin never has to be dug out of the log.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("stage {stage} collaborator '{unit}' failed{}", status_label(.status))]
    Failed {
        stage: Step,
        unit: String,
        status: Option<i32>,
    },

    #[error("stage {stage} collaborator '{unit}' could not be started: {source}")]
    Spawn {
        stage: Step,
        unit: String,
        #[source]
        source: io::Error,
    },

    #[error("stage {stage} collaborator '{unit}' produced no output to capture")]
    EmptyCapture { stage: Step, unit: String },
}

impl CollaboratorError {
    /// Exit code the orchestrator propagates: the failing step's own
    /// status where one exists, 1 otherwise (spawn failure, signal).
    pub fn exit_code(&self) -> i32 {
        match self {
            CollaboratorError::Failed {
                status: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_unknown_tier() {
        let err = ConfigError::UnknownTier {
            tier: "7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown throughput tier '7' - expected low|1, medium|5 or high|10"
        );
    }

    #[test]
    fn config_error_display_invalid_name() {
        let err = ConfigError::InvalidName {
            resource: "storage account",
            name: "waytoolongforazurestorage".to_string(),
            constraint: "exceeds the 24-character limit".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "derived storage account name 'waytoolongforazurestorage' exceeds the 24-character limit"
        );
    }

    #[test]
    fn collaborator_error_names_stage_and_unit() {
        let err = CollaboratorError::Failed {
            stage: Step::Ingestion,
            unit: "create-event-hubs".to_string(),
            status: Some(5),
        };
        assert_eq!(
            err.to_string(),
            "stage I collaborator 'create-event-hubs' failed with exit code 5"
        );
    }

    #[test]
    fn collaborator_exit_code_propagates_status() {
        let err = CollaboratorError::Failed {
            stage: Step::Common,
            unit: "create-storage-account".to_string(),
            status: Some(7),
        };
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn collaborator_exit_code_defaults_to_one() {
        let err = CollaboratorError::Failed {
            stage: Step::Common,
            unit: "create-storage-account".to_string(),
            status: None,
        };
        assert_eq!(err.exit_code(), 1);

        let err = CollaboratorError::EmptyCapture {
            stage: Step::Processing,
            unit: "resolve-monitoring-workspace".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
