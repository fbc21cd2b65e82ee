//! PVC Reaper
//!
//! Deletes PersistentVolumeClaims that are unbound or not used by any pod.
//! Meant to be run periodically, e.g. from a CronJob.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pvc_reaper::{CleanupConfig, KubeCluster, Orchestrator, Result, DEFAULT_CONFIG_PATH};

// =============================================================================
// CLI Arguments
// =============================================================================

/// PVC Reaper - removes orphaned PersistentVolumeClaims
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a kubeconfig file; inferred when omitted
    #[arg(long, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// Cleanup config file
    #[arg(short = 'c', long = "config", env = "PVC_REAPER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Report orphaned claims without deleting them
    #[arg(long, env = "DRY_RUN")]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting PVC Reaper {}", pvc_reaper::VERSION);

    let cluster = KubeCluster::connect(args.kubeconfig.as_deref()).await?;
    let config = CleanupConfig::load_or_default(&args.config);

    let orchestrator = Orchestrator::new(&config, Arc::new(cluster)).with_dry_run(args.dry_run);
    let report = orchestrator.run().await?;

    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("kube=info".parse().unwrap())
        .add_directive("tower=warn".parse().unwrap());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
