//! tdak: Topological Failure Analysis of a Synthetic Cluster
//!
//! Generates a healthy cluster, injects the requested failure, and reports
//! how the persistence diagrams of both lenses moved.
//!
//! ## Protocol
//!
//! 1. Generate a cluster snapshot (seedable)
//! 2. Inject the failure into a derived copy
//! 3. Compute metric-space and network diagrams for both snapshots
//! 4. Compare per dimension, score storage outliers
//! 5. Render the report and the strict signature verdict

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tda_cluster_faults::{AnalysisConfig, AnalysisReport, ClusterAnalyzer, ClusterGenerator, FailureType};

#[derive(Debug, Parser)]
#[command(name = "tdak", version, about = "Topological failure detection for clusters")]
struct Args {
    /// zone_outage | storage_failure | network_congestion | dns_failure | pod_overload
    failure: FailureType,

    /// Number of availability zones
    #[arg(long, default_value_t = 3)]
    zones: usize,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// TOML file with analysis settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

/// Defaults, then the optional file, then `TDAK_*` variables
fn load_config(path: Option<&PathBuf>) -> Result<AnalysisConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path.as_path()).required(true));
    }
    let settings = builder
        .add_source(config::Environment::with_prefix("TDAK").try_parsing(true))
        .build()
        .context("reading configuration")?;

    settings
        .try_deserialize()
        .context("invalid analysis configuration")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = load_config(args.config.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(failure = %args.failure, zones = args.zones, seed, "starting analysis");

    let mut generator = ClusterGenerator::seeded(args.zones, seed)?;
    let before = generator.generate()?;
    let after = generator.inject_failure(&before, args.failure)?;
    info!(
        nodes_before = before.nodes.len(),
        nodes_after = after.nodes.len(),
        dependencies = before.dependencies.len(),
        "snapshots ready"
    );

    let analyzer = ClusterAnalyzer::new(config);
    let report = analyzer.analyze(&before, &after, args.failure)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(&report, seed);
    }

    Ok(())
}

fn render(report: &AnalysisReport, seed: u64) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  TDA Failure Analysis: {}", report.failure_type);
    println!("  seed = {}", seed);
    println!("═══════════════════════════════════════════════════════════════\n");

    let metric = &report.metric;
    println!("Metric Space:");
    println!("  H0 components: {} → {}", metric.h0.before_count, metric.h0.after_count);
    println!("  H0 Wasserstein: {:.4}", metric.h0.distance);
    println!("  H0 entropy Δ:   {:+.4}", metric.h0.entropy_delta);
    println!("  H1 cycles:     {} → {}", metric.h1.before_count, metric.h1.after_count);
    println!("  H1 Wasserstein: {:.4}", metric.h1.distance);
    println!(
        "  Storage: mean {:.3}, max {:.3}, outliers {}",
        metric.storage.mean, metric.storage.max, report.storage_outliers
    );
    println!();

    let network = &report.network;
    println!("Network:");
    println!(
        "  Active dependencies: {}/{}",
        network.active_dependencies, network.total_dependencies
    );
    println!("  H0 components: {} → {}", network.h0.before_count, network.h0.after_count);
    println!("  H0 Wasserstein: {:.4}", network.h0.distance);
    println!("  H0 entropy Δ:   {:+.4}", network.h0.entropy_delta);
    println!("  H1 cycles:     {} → {}", network.h1.before_count, network.h1.after_count);
    println!("  H1 Wasserstein: {:.4}", network.h1.distance);
    println!();

    println!("Expected Signature:");
    for indicator in report.signature_match {
        println!("  {:<14} {}", indicator.name, indicator.description);
    }
    println!();

    let verdict = if report.supports_declared_failure() {
        "CONFIRMED"
    } else {
        "not confirmed by strict rule"
    };
    println!("Verdict: {}", verdict);
}
