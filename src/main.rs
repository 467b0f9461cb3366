//! Cagecrawl main entry point
//!
//! Command-line interface for the fight-card harvester.

use cagecrawl::config::load_config_with_hash;
use cagecrawl::crawler::crawl;
use cagecrawl::export::write_exports;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cagecrawl: a concurrent MMA fight-card harvester
///
/// Crawls fight-center and fighter pages from the configured seeds,
/// consolidates events and fighter records, and writes CSV/JSON exports
/// once the crawl has fully drained.
#[derive(Parser, Debug)]
#[command(name = "cagecrawl")]
#[command(version)]
#[command(about = "A concurrent MMA fight-card harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    let (store, report) = crawl(config.clone()).await?;

    // export failure is fatal: the aggregation only exists in memory
    write_exports(&store, &config.output, report.started_at)?;

    tracing::info!(
        "Done: {} events, {} fighters exported",
        report.events,
        report.fighters
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cagecrawl=info,warn"),
            1 => EnvFilter::new("cagecrawl=debug,info"),
            2 => EnvFilter::new("cagecrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: validates config and shows the crawl plan
fn handle_dry_run(config: &cagecrawl::Config, config_hash: &str) {
    println!("=== Cagecrawl Dry Run ===\n");

    println!("Config hash: {}\n", config_hash);

    println!("Crawler:");
    println!("  Workers: {}", config.crawler.workers);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  User agent: {}", config.crawler.user_agent);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    match config.crawler.max_runtime_secs {
        Some(budget) => println!("  Wall-clock budget: {}s", budget),
        None => println!("  Wall-clock budget: unbounded"),
    }

    println!("\nAdmission:");
    println!("  Domains: {}", config.admission.allowed_domains.join(", "));
    println!("  Allow: {}", config.admission.allow.join(", "));
    println!("  Block: {}", config.admission.block.join(", "));

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\nOutput:");
    println!("  Events CSV: {}", config.output.events_path);
    println!("  Fighters CSV: {}", config.output.fighters_path);
    if let Some(json_path) = &config.output.json_path {
        println!("  JSON: {}", json_path);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl with {} workers from {} seed URLs",
        config.crawler.workers,
        config.seeds.len()
    );
}
