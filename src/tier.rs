//! Throughput tiers and their sizing profiles.
//!
//! A tier fixes every sizing parameter for a run, including both cluster
//! platform variants; the platform selected at run time decides which
//! pair is exported to collaborators.

use std::fmt;

use serde::Serialize;

/// Target load level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Accepts the tier name or its messages-per-second-thousands
    /// shorthand. Anything else yields `None`; callers treat that as a
    /// fatal configuration error, never as a default.
    pub fn parse(tier: &str) -> Option<Tier> {
        match tier.trim().to_ascii_lowercase().as_str() {
            "low" | "1" => Some(Tier::Low),
            "medium" | "5" => Some(Tier::Medium),
            "high" | "10" => Some(Tier::High),
            _ => None,
        }
    }

    /// Nominal ingest rate in messages per second.
    pub fn messages_per_second(self) -> u32 {
        match self {
            Tier::Low => 1_000,
            Tier::Medium => 5_000,
            Tier::High => 10_000,
        }
    }

    /// Sizing profile for this tier.
    pub fn profile(self) -> TierProfile {
        match self {
            Tier::Low => LOW,
            Tier::Medium => MEDIUM,
            Tier::High => HIGH,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        };
        write!(f, "{name}")
    }
}

/// Sizing parameters for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierProfile {
    /// Event hub throughput units
    pub eventhub_capacity: u32,
    pub eventhub_partitions: u32,
    pub job_parallelism: u32,
    pub simulator_instances: u32,
    pub hdinsight_workers: u32,
    pub hdinsight_worker_size: &'static str,
    pub aks_nodes: u32,
    pub aks_vm_size: &'static str,
}

const LOW: TierProfile = TierProfile {
    eventhub_capacity: 2,
    eventhub_partitions: 1,
    job_parallelism: 1,
    simulator_instances: 1,
    hdinsight_workers: 3,
    hdinsight_worker_size: "Standard_D3_v2",
    aks_nodes: 3,
    aks_vm_size: "Standard_D2s_v3",
};

const MEDIUM: TierProfile = TierProfile {
    eventhub_capacity: 6,
    eventhub_partitions: 4,
    job_parallelism: 4,
    simulator_instances: 3,
    hdinsight_workers: 4,
    hdinsight_worker_size: "Standard_D4_v2",
    aks_nodes: 4,
    aks_vm_size: "Standard_D4s_v3",
};

const HIGH: TierProfile = TierProfile {
    eventhub_capacity: 12,
    eventhub_partitions: 8,
    job_parallelism: 8,
    simulator_instances: 5,
    hdinsight_workers: 5,
    hdinsight_worker_size: "Standard_D4_v2",
    aks_nodes: 6,
    aks_vm_size: "Standard_D8s_v3",
};
