use std::path::PathBuf;

use clap::Parser;
use streambench::{JobTopology, Platform};

/// streambench - deploy and verify a streaming-at-scale benchmark
#[derive(Parser, Debug)]
#[command(name = "streambench")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Stages: C common, I ingestion, P processing, T test clients, M metrics, V verify."
)]
pub struct Cli {
    /// Deployment prefix; every resource name is derived from it
    #[arg(short = 'n', long, value_name = "PREFIX")]
    pub name: String,

    /// Stages to execute, as a letter set
    #[arg(short, long, default_value = "CIPTM")]
    pub steps: String,

    /// Throughput tier: low|1, medium|5 or high|10 (x1000 msg/s)
    #[arg(short, long, default_value = "low")]
    pub tier: String,

    /// Region to deploy into
    #[arg(short, long, default_value = "eastus")]
    pub location: String,

    /// Cluster platform running the stream job
    #[arg(short, long, value_enum, default_value_t = Platform::Hdinsight)]
    pub platform: Platform,

    /// Stream-job topology to build and submit
    #[arg(short = 'j', long, value_enum, default_value_t = JobTopology::SimpleRelay)]
    pub topology: JobTopology,

    /// Service principal client id (falls back to STREAMBENCH_CLIENT_ID)
    #[arg(long, value_name = "GUID")]
    pub client_id: Option<String>,

    /// Service principal client secret (falls back to STREAMBENCH_CLIENT_SECRET)
    #[arg(long, value_name = "SECRET")]
    pub client_secret: Option<String>,

    /// Directory holding the collaborator scripts
    #[arg(long, default_value = "scripts", value_name = "DIR")]
    pub scripts: PathBuf,

    /// Output line-delimited JSON events for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
