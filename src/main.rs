//! streambench CLI - orchestrates the six-stage deployment and
//! verification of a streaming-at-scale benchmark.
//!
//! Usage: streambench -n <PREFIX> [-s CIPTM] [-t low] [-l eastus]
//!                    [-p hdinsight] [-j simple-relay]
//!
//! Stages run in fixed order; a failing collaborator aborts the run with
//! its own exit status.

mod cli;

use std::process::exit;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;
use streambench::{
    preflight, CollaboratorError, ConfigError, DeploymentConfig, DeploymentRequest,
    ProcessCollaborators, ResourceNames, RunEvent, RunLog, StageExecutor, RUN_LOG_PATH,
};

fn main() {
    let cli = cli::Cli::parse();

    if let Err(err) = run(&cli) {
        if let Some(config_err) = err.downcast_ref::<ConfigError>() {
            // Misuse gets the full usage text, like any flag error.
            eprintln!("error: {config_err}");
            eprintln!();
            let _ = cli::Cli::command().print_help();
            exit(2);
        }
        let code = err
            .downcast_ref::<CollaboratorError>()
            .map(CollaboratorError::exit_code)
            .unwrap_or(1);
        eprintln!("error: {err:#}");
        exit(code);
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let request = DeploymentRequest {
        prefix: cli.name.clone(),
        steps: cli.steps.clone(),
        tier: cli.tier.clone(),
        location: cli.location.clone(),
        platform: cli.platform,
        topology: cli.topology,
        client_id: cli
            .client_id
            .clone()
            .or_else(|| std::env::var("STREAMBENCH_CLIENT_ID").ok()),
        client_secret: cli
            .client_secret
            .clone()
            .or_else(|| std::env::var("STREAMBENCH_CLIENT_SECRET").ok()),
    };
    let config = DeploymentConfig::resolve(request)?;
    let names = ResourceNames::derive(&config.prefix, Local::now())?;

    let pretty = !cli.json && std::io::stdout().is_terminal();

    if cli.json {
        print_event(&serde_json::json!({
            "event": "run_started",
            "config": config,
            "names": names,
        }));
    } else {
        println!("{} streambench", marker(pretty, "🚀", "=="));
        println!("Prefix: {}", config.prefix);
        println!(
            "Steps: {}  Tier: {} ({} msg/s)",
            config.steps,
            config.tier,
            config.tier.messages_per_second()
        );
        println!(
            "Platform: {}  Topology: {}  Location: {}",
            config.platform, config.topology, config.location
        );
        println!("Log: {RUN_LOG_PATH}");
        println!();
    }

    let tools = preflight::required_tools(&config);
    if cli.verbose >= 1 && !cli.json {
        println!("Checking tools: {}", tools.join(", "));
    }
    preflight::check(&tools)?;

    let log = RunLog::create(RUN_LOG_PATH)
        .with_context(|| format!("creating run log at {RUN_LOG_PATH}"))?;
    log.header(&format!(
        "streambench run for '{}' (tier {}, platform {}, steps {})",
        config.prefix, config.tier, config.platform, config.steps
    ));

    let collaborators =
        ProcessCollaborators::new(cli.scripts.clone(), log.clone()).with_echo(!cli.json);
    let executor = StageExecutor::new(
        &config,
        config.tier.profile(),
        &names,
        &collaborators,
        &log,
    );
    executor.run(|event| render_event(event, cli.json, pretty))?;

    if cli.json {
        print_event(&serde_json::json!({"event": "run_complete", "status": "success"}));
    } else {
        println!();
        println!("{} pipeline complete", marker(pretty, "✅", "OK"));
    }
    Ok(())
}

fn render_event(event: RunEvent, json: bool, pretty: bool) {
    if json {
        let value = match event {
            RunEvent::StageStarted { stage } => serde_json::json!({
                "event": "stage_started",
                "stage": stage,
                "letter": stage.letter().to_string(),
            }),
            RunEvent::StageSkipped { stage } => serde_json::json!({
                "event": "stage_skipped",
                "stage": stage,
                "letter": stage.letter().to_string(),
            }),
            RunEvent::UnitStarted { stage, unit } => serde_json::json!({
                "event": "unit_started",
                "stage": stage,
                "unit": unit,
            }),
            // run() reports completion itself.
            RunEvent::RunCompleted => return,
        };
        print_event(&value);
        return;
    }

    match event {
        RunEvent::StageStarted { stage } => {
            println!("{} stage {stage}: {}", marker(pretty, "▶", "->"), stage.label());
        }
        RunEvent::StageSkipped { stage } => {
            println!(
                "{} stage {stage}: {} (skipped)",
                marker(pretty, "⏭", "--"),
                stage.label()
            );
        }
        RunEvent::UnitStarted { unit, .. } => {
            println!("  {} {unit}", marker(pretty, "↳", "-"));
        }
        RunEvent::RunCompleted => {}
    }
}

fn print_event(value: &serde_json::Value) {
    println!("{value}");
}

fn marker(pretty: bool, emoji: &'static str, plain: &'static str) -> &'static str {
    if pretty {
        emoji
    } else {
        plain
    }
}
