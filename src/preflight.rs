//! Local tooling checks that run before any stage.
//!
//! Collaborators shell out to cloud and build tooling; discovering a
//! missing binary five minutes into a deployment is the worst place to
//! find out. The check short-circuits the whole run on the first missing
//! tool, before stage C.

use std::process::{Command, Stdio};

use crate::config::{DeploymentConfig, Platform};
use crate::error::PreflightError;
use crate::steps::Step;

/// Tools the resolved configuration needs: `az` and `jq` always, `mvn`
/// when stage P will build the job, `kubectl` and `helm` on AKS.
pub fn required_tools(config: &DeploymentConfig) -> Vec<&'static str> {
    let mut tools = vec!["az", "jq"];
    if config.steps.contains(Step::Processing) {
        tools.push("mvn");
    }
    if config.platform == Platform::Aks {
        tools.push("kubectl");
        tools.push("helm");
    }
    tools
}

/// Verify each tool is invocable, in order; fail fast on the first that
/// is not.
pub fn check(tools: &[&str]) -> Result<(), PreflightError> {
    for tool in tools {
        if !tool_available(tool) {
            return Err(PreflightError::MissingTool {
                tool: tool.to_string(),
            });
        }
    }
    Ok(())
}

fn tool_available(tool: &str) -> bool {
    let mut command = Command::new(tool);
    // `az --version` is not a thing and `kubectl --version` exits
    // non-zero on current releases.
    match tool {
        "az" => command.arg("version"),
        "kubectl" => command.args(["version", "--client"]),
        _ => command.arg("--version"),
    };
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
