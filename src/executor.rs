//! The six-stage deployment pipeline.
//!
//! Stages run strictly in order C, I, P, T, M, V. Every stage binds its
//! slice of derived configuration whether or not it is gated on: later
//! stages and re-runs reference those names even when the stage itself
//! does not execute, because the resources may already exist. Gated-on
//! stages then invoke their collaborators synchronously; the first
//! failure aborts the run with the stage and unit in the error.

use crate::collaborator::Collaborators;
use crate::config::{DeploymentConfig, Platform};
use crate::env::StageEnv;
use crate::error::CollaboratorError;
use crate::names::{ResourceNames, CONSUMER_GROUP, EVENTHUB_IN, EVENTHUB_OUT};
use crate::runlog::RunLog;
use crate::steps::Step;
use crate::tier::TierProfile;

/// Progress notifications emitted while the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    StageStarted { stage: Step },
    StageSkipped { stage: Step },
    UnitStarted { stage: Step, unit: &'static str },
    RunCompleted,
}

/// Top-level driver over one immutable configuration set.
pub struct StageExecutor<'a, C: Collaborators> {
    config: &'a DeploymentConfig,
    profile: TierProfile,
    names: &'a ResourceNames,
    collaborators: &'a C,
    log: &'a RunLog,
}

impl<'a, C: Collaborators> StageExecutor<'a, C> {
    pub fn new(
        config: &'a DeploymentConfig,
        profile: TierProfile,
        names: &'a ResourceNames,
        collaborators: &'a C,
        log: &'a RunLog,
    ) -> StageExecutor<'a, C> {
        StageExecutor {
            config,
            profile,
            names,
            collaborators,
            log,
        }
    }

    /// Drive all six stages. Returns the fully bound environment so
    /// callers can inspect exactly what collaborators received.
    pub fn run(
        &self,
        mut on_event: impl FnMut(RunEvent),
    ) -> Result<StageEnv, CollaboratorError> {
        let mut env = StageEnv::new();
        self.bind_globals(&mut env);
        for stage in Step::ALL {
            self.run_stage(stage, &mut env, &mut on_event)?;
        }
        self.log.header("pipeline complete");
        on_event(RunEvent::RunCompleted);
        Ok(env)
    }

    fn bind_globals(&self, env: &mut StageEnv) {
        env.set("PREFIX", self.config.prefix.clone());
        env.set("RESOURCE_GROUP", self.names.resource_group.clone());
        env.set("LOCATION", self.config.location.clone());
        env.set("THROUGHPUT_TIER", self.config.tier.to_string());
        env.set("PLATFORM", self.config.platform.as_str());
        env.set("JOB_TOPOLOGY", self.config.topology.as_str());
        env.set("EVENTHUB_CAPACITY", self.profile.eventhub_capacity.to_string());
        env.set("EVENTHUB_PARTITIONS", self.profile.eventhub_partitions.to_string());
        env.set("JOB_PARALLELISM", self.profile.job_parallelism.to_string());
        env.set("SIMULATOR_INSTANCES", self.profile.simulator_instances.to_string());
        match self.config.platform {
            Platform::Hdinsight => {
                env.set("HDINSIGHT_WORKERS", self.profile.hdinsight_workers.to_string());
                env.set("HDINSIGHT_WORKER_SIZE", self.profile.hdinsight_worker_size);
            }
            Platform::Aks => {
                env.set("AKS_NODES", self.profile.aks_nodes.to_string());
                env.set("AKS_VM_SIZE", self.profile.aks_vm_size);
            }
        }
        if let Some(sp) = &self.config.service_principal {
            env.set("SERVICE_PRINCIPAL_CLIENT_ID", sp.client_id.clone());
            env.set("SERVICE_PRINCIPAL_CLIENT_SECRET", sp.client_secret.clone());
        }
    }

    fn run_stage(
        &self,
        stage: Step,
        env: &mut StageEnv,
        on_event: &mut impl FnMut(RunEvent),
    ) -> Result<(), CollaboratorError> {
        // Bind this stage's derived configuration - unconditional.
        let units: &[&'static str] = match stage {
            Step::Common => {
                env.set("AZURE_STORAGE_ACCOUNT", self.names.storage_account.clone());
                env.set("VNET_NAME", self.names.vnet.clone());
                &["create-resource-group", "create-storage-account", "create-virtual-network"]
            }
            Step::Ingestion => {
                env.set("EVENTHUB_NAMESPACE_IN", self.names.eventhub_namespace_in.clone());
                env.set("EVENTHUB_NAMESPACE_OUT", self.names.eventhub_namespace_out.clone());
                env.set("EVENTHUB_NAME_IN", EVENTHUB_IN);
                env.set("EVENTHUB_NAME_OUT", EVENTHUB_OUT);
                env.set("EVENTHUB_CONSUMER_GROUP", CONSUMER_GROUP);
                &["create-event-hubs"]
            }
            Step::Processing => {
                env.set("MONITOR_WORKSPACE", self.names.monitor_workspace.clone());
                let cluster = match self.config.platform {
                    Platform::Hdinsight => &self.names.hdinsight_cluster,
                    Platform::Aks => &self.names.aks_cluster,
                };
                env.set("CLUSTER_NAME", cluster.clone());
                env.set("ACR_NAME", self.names.container_registry.clone());
                env.set("CLUSTER_VAULT", self.names.cluster_vault.clone());
                env.set("VERIFY_VAULT", self.names.verify_vault.clone());
                env.set("IMAGE_TAG", self.names.image_tag.clone());
                // The workspace id is derived state only a collaborator
                // can resolve. It is bound before the gate check so later
                // stages see it even when P is skipped, and its failure
                // aborts the run regardless of the gate.
                let workspace_id =
                    self.collaborators
                        .capture(stage, "resolve-monitoring-workspace", env)?;
                env.set("MONITOR_WORKSPACE_ID", workspace_id);
                &["create-monitoring", "create-cluster", "build-streaming-job", "submit-streaming-job"]
            }
            Step::Test => {
                // Test clients publish into the inbound namespace with
                // send-direction credentials.
                env.set("SIMULATOR_POLICY_NAME", "send");
                &["create-test-clients"]
            }
            Step::Metrics => &["report-throughput"],
            Step::Verify => {
                env.set("VERIFY_WORKSPACE", self.names.verify_workspace.clone());
                env.set("VERIFY_EVENTHUB", EVENTHUB_OUT);
                &["create-verification-workspace", "run-verification"]
            }
        };

        // Gate check - a skipped stage keeps its bindings.
        if !self.config.steps.contains(stage) {
            self.log
                .header(&format!("stage {stage} ({}) skipped", stage.label()));
            on_event(RunEvent::StageSkipped { stage });
            return Ok(());
        }

        self.log.header(&format!("stage {stage} ({})", stage.label()));
        on_event(RunEvent::StageStarted { stage });

        for unit in units {
            self.log.header(&format!("running {unit}"));
            on_event(RunEvent::UnitStarted { stage, unit });
            self.collaborators.invoke(stage, unit, env)?;
        }
        Ok(())
    }
}
