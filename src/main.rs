//! Title-Crawler main entry point
//!
//! This is the command-line interface for the Title-Crawler page fetcher.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use title_crawler::config::{load_config, validate, Config};
use title_crawler::crawler::crawl;
use title_crawler::output::{print_summary, write_outputs};
use title_crawler::url::load_urls;
use tracing_subscriber::EnvFilter;

/// Title-Crawler: a concurrent page title fetcher
///
/// Fetches every URL in a line-delimited list with a bounded pool of
/// workers, extracts each page's title and writes a JSON report with
/// per-URL timings and overall throughput.
#[derive(Parser, Debug)]
#[command(name = "title-crawler")]
#[command(version)]
#[command(about = "A concurrent page title fetcher", long_about = None)]
struct Cli {
    /// Path to the URL list, one URL per line
    #[arg(value_name = "URLS_FILE", default_value = "urls.txt")]
    urls: PathBuf,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of concurrent workers
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    workers: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Where to write the JSON report
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also write a markdown summary to this path
    #[arg(short, long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load the config and URL list, show what would be fetched and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    let urls = load_urls(&cli.urls)
        .with_context(|| format!("Error loading URLs from {}", cli.urls.display()))?;

    println!("Loaded {} URLs", urls.len());

    if cli.dry_run {
        handle_dry_run(&config, &urls);
        return Ok(());
    }

    println!("Starting crawl with max workers: {}", config.crawler.workers);

    let report = crawl(&config, urls).await.context("Crawl failed to start")?;

    print_summary(&report.summary);

    write_outputs(&report, &config.output).context("Error saving crawl output")?;
    println!("Results saved to {}", config.output.results_path);
    if let Some(summary_path) = &config.output.summary_path {
        println!("Summary written to {}", summary_path);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("title_crawler=info,warn"),
            1 => EnvFilter::new("title_crawler=debug,info"),
            2 => EnvFilter::new("title_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.workers = workers as usize;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    if let Some(output) = &cli.output {
        config.output.results_path = output.display().to_string();
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be fetched
fn handle_dry_run(config: &Config, urls: &[String]) {
    println!("=== Title-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", config.crawler.workers);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    if let Some(connect) = config.crawler.connect_timeout_secs {
        println!("  Connect timeout: {}s", connect);
    }
    println!(
        "  Idle connections per host: {}",
        config.crawler.pool_max_idle_per_host
    );
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\nURLs ({}):", urls.len());
    for url in urls {
        println!("  - {}", url);
    }
}
