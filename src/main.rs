//! Freq-Spider main entry point
//!
//! This is the command-line interface for the Freq-Spider term-frequency crawler.

use anyhow::Context;
use clap::Parser;
use freq_spider::config::{apply_overrides, load_config, Config};
use freq_spider::crawler::crawl;
use freq_spider::output::{load_statistics, print_statistics, CrawlStatistics, DEFAULT_TOP_TERMS};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Freq-Spider: a concurrent term-frequency crawler
///
/// Looks up the corpus frequency of every line in a term list, writing
/// each result to a file beside the list as soon as it arrives, then
/// rewriting that file sorted by frequency.
#[derive(Parser, Debug)]
#[command(name = "freq-spider")]
#[command(version)]
#[command(about = "A concurrent term-frequency crawler", long_about = None)]
struct Cli {
    /// Term list, one term per line
    #[arg(value_name = "TERMS")]
    terms: PathBuf,

    /// Maximum concurrent requests (invalid values fall back to 1)
    #[arg(short, long, value_name = "N")]
    concurrency: Option<String>,

    /// Per-request timeout in seconds (invalid values fall back to 30)
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<String>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the search endpoint
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override the result file name
    #[arg(long, value_name = "NAME")]
    output_name: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from an existing result file and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.stats {
        handle_stats(&cli, &config)
    } else {
        handle_crawl(&cli, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("freq_spider=info,warn"),
            1 => EnvFilter::new("freq_spider=debug,info"),
            2 => EnvFilter::new("freq_spider=trace,debug"),
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

/// Layers defaults, the optional config file, and command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    apply_overrides(
        &mut config,
        cli.concurrency.as_deref(),
        cli.timeout.as_deref(),
    );
    if let Some(base_url) = &cli.base_url {
        config.endpoint.base_url = base_url.clone();
    }
    if let Some(name) = &cli.output_name {
        config.output.file_name = name.clone();
    }

    freq_spider::config::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --stats mode: summarizes an existing result file
fn handle_stats(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = config.output.path_for(&cli.terms);
    println!("Result file: {}\n", path.display());

    let stats = load_statistics(&path)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} (concurrency {}, timeout {}s)",
        cli.terms.display(),
        config.crawler.concurrency,
        config.crawler.timeout_secs
    );

    // Reported once, by the error returned from main
    let report = crawl(config, &cli.terms).await.context("Crawl failed")?;

    tracing::info!(
        "Crawl completed: {} terms ({} resolved, {} failed) in {}s",
        report.term_count,
        report.resolved_count(),
        report.failed_count(),
        report.duration().num_seconds()
    );
    if !report.persisted {
        tracing::warn!(
            "Sorted results could not be written; {} may hold the unsorted log",
            report.output_path.display()
        );
    }

    if !cli.quiet {
        let stats = CrawlStatistics::from_results(&report.results, DEFAULT_TOP_TERMS);
        println!();
        print_statistics(&stats);
    }

    Ok(())
}
