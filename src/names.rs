//! Deterministic resource identifiers derived from the deployment prefix.
//!
//! Every name is a pure function of the prefix, so re-running with the
//! same prefix references the same resources. The one exception is the
//! build image tag, which folds in the process start time so repeated
//! builds never collide.
//!
//! Each derived name is validated here against its target service's
//! length and character constraints, so an over-long prefix fails fast
//! with a descriptive error instead of surfacing as a cloud-side
//! rejection halfway through a run.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::ConfigError;

/// Inbound hub (topic) name, scoped to the inbound namespace.
pub const EVENTHUB_IN: &str = "streaming-in";
/// Outbound hub name; verification always reads from this hub.
pub const EVENTHUB_OUT: &str = "streaming-out";
/// Consumer group the verification pass reads with.
pub const CONSUMER_GROUP: &str = "verify";

/// The full set of identifiers used system-wide for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceNames {
    pub resource_group: String,
    pub storage_account: String,
    pub vnet: String,
    pub eventhub_namespace_in: String,
    pub eventhub_namespace_out: String,
    pub monitor_workspace: String,
    pub hdinsight_cluster: String,
    pub aks_cluster: String,
    /// Key vault holding the cluster's service principal
    pub cluster_vault: String,
    /// Key vault holding the verification token; capped at 24 characters
    pub verify_vault: String,
    pub container_registry: String,
    pub verify_workspace: String,
    /// `{prefix}-{timestamp}`; the only time-dependent field
    pub image_tag: String,
}

impl ResourceNames {
    pub fn derive(
        prefix: &str,
        started_at: DateTime<Local>,
    ) -> Result<ResourceNames, ConfigError> {
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        let names = ResourceNames {
            resource_group: prefix.to_string(),
            storage_account: format!("{prefix}storage"),
            vnet: format!("{prefix}-vnet"),
            eventhub_namespace_in: format!("{prefix}-in"),
            eventhub_namespace_out: format!("{prefix}-out"),
            monitor_workspace: format!("{prefix}-monitor"),
            hdinsight_cluster: format!("{prefix}hdi"),
            aks_cluster: format!("{prefix}aks"),
            cluster_vault: format!("{prefix}spkv"),
            verify_vault: format!("{prefix}verifykv"),
            container_registry: format!("{prefix}acr"),
            verify_workspace: format!("{prefix}-verify"),
            image_tag: format!("{prefix}-{}", started_at.format("%Y%m%d%H%M%S")),
        };
        names.validate()?;
        Ok(names)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check("resource group", &self.resource_group, 90, Charset::AlnumHyphen)?;
        check("storage account", &self.storage_account, 24, Charset::LowerAlnum)?;
        check("virtual network", &self.vnet, 64, Charset::AlnumHyphen)?;
        check(
            "inbound event hub namespace",
            &self.eventhub_namespace_in,
            50,
            Charset::AlnumHyphen,
        )?;
        check(
            "outbound event hub namespace",
            &self.eventhub_namespace_out,
            50,
            Charset::AlnumHyphen,
        )?;
        check("monitoring workspace", &self.monitor_workspace, 63, Charset::AlnumHyphen)?;
        check("HDInsight cluster", &self.hdinsight_cluster, 59, Charset::AlnumHyphen)?;
        check("AKS cluster", &self.aks_cluster, 63, Charset::AlnumHyphen)?;
        check("cluster key vault", &self.cluster_vault, 24, Charset::AlnumHyphen)?;
        check("verification key vault", &self.verify_vault, 24, Charset::AlnumHyphen)?;
        check("container registry", &self.container_registry, 50, Charset::Alnum)?;
        if self.container_registry.len() < 5 {
            return Err(ConfigError::InvalidName {
                resource: "container registry",
                name: self.container_registry.clone(),
                constraint: "is shorter than the 5-character minimum".to_string(),
            });
        }
        check("verification workspace", &self.verify_workspace, 64, Charset::AlnumHyphen)?;
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Charset {
    LowerAlnum,
    Alnum,
    AlnumHyphen,
}

impl Charset {
    fn allows(self, c: char) -> bool {
        match self {
            Charset::LowerAlnum => c.is_ascii_lowercase() || c.is_ascii_digit(),
            Charset::Alnum => c.is_ascii_alphanumeric(),
            Charset::AlnumHyphen => c.is_ascii_alphanumeric() || c == '-',
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Charset::LowerAlnum => "lowercase letters and digits",
            Charset::Alnum => "letters and digits",
            Charset::AlnumHyphen => "letters, digits and hyphens",
        }
    }
}

fn check(
    resource: &'static str,
    name: &str,
    max: usize,
    charset: Charset,
) -> Result<(), ConfigError> {
    if name.len() > max {
        return Err(ConfigError::InvalidName {
            resource,
            name: name.to_string(),
            constraint: format!("exceeds the {max}-character limit"),
        });
    }
    if let Some(bad) = name.chars().find(|c| !charset.allows(*c)) {
        return Err(ConfigError::InvalidName {
            resource,
            name: name.to_string(),
            constraint: format!("contains '{bad}' but only {} are allowed", charset.describe()),
        });
    }
    Ok(())
}
