//! Run configuration resolution.
//!
//! Raw command-line input is resolved exactly once into an immutable
//! [`DeploymentConfig`]; every later component only reads it. Unresolved
//! input (missing prefix, unknown tier, bad step letter) is a fatal
//! `ConfigError` surfaced before any stage configuration is bound.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;
use crate::steps::StepSet;
use crate::tier::Tier;

/// Cluster platform running the stream job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Hdinsight,
    Aks,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Hdinsight => "hdinsight",
            Platform::Aks => "aks",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stream-job topology built and submitted in stage P.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum JobTopology {
    #[default]
    SimpleRelay,
    WindowedAggregation,
}

impl JobTopology {
    pub fn as_str(self) -> &'static str {
        match self {
            JobTopology::SimpleRelay => "simple-relay",
            JobTopology::WindowedAggregation => "windowed-aggregation",
        }
    }
}

impl fmt::Display for JobTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional credentials handed to cluster-provisioning collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePrincipal {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
}

/// Raw, unvalidated input to [`DeploymentConfig::resolve`].
#[derive(Debug, Clone, Default)]
pub struct DeploymentRequest {
    pub prefix: String,
    pub steps: String,
    pub tier: String,
    pub location: String,
    pub platform: Platform,
    pub topology: JobTopology,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// The resolved, immutable configuration for one run.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentConfig {
    /// Namespace root for every derived resource name
    pub prefix: String,
    pub location: String,
    pub steps: StepSet,
    pub tier: Tier,
    pub platform: Platform,
    pub topology: JobTopology,
    pub service_principal: Option<ServicePrincipal>,
}

impl DeploymentConfig {
    pub fn resolve(request: DeploymentRequest) -> Result<DeploymentConfig, ConfigError> {
        let prefix = request.prefix.trim().to_string();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        let steps = StepSet::parse(&request.steps)?;

        let tier = Tier::parse(&request.tier).ok_or_else(|| ConfigError::UnknownTier {
            tier: request.tier.clone(),
        })?;

        let service_principal = match (request.client_id, request.client_secret) {
            (Some(client_id), Some(client_secret)) => Some(ServicePrincipal {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteServicePrincipal),
        };

        Ok(DeploymentConfig {
            prefix,
            location: request.location,
            steps,
            tier,
            platform: request.platform,
            topology: request.topology,
            service_principal,
        })
    }
}
