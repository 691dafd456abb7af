//! zeiler-migrate main entry point
//!
//! This is the command-line interface for migrating the ZEILER.me website.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use zeiler_migrate::config::{load_config_with_hash, validate, Config};
use zeiler_migrate::crawler::run_crawl;
use zeiler_migrate::integrate::{run_integrate, InputSource};
use zeiler_migrate::output::{load_records, print_crawl_report, print_statistics};

/// zeiler-migrate: content migration for ZEILER.me
///
/// Crawls the legacy site into a JSON record list, then turns that list
/// into the data module of the redesigned front end.
#[derive(Parser, Debug)]
#[command(name = "zeiler-migrate")]
#[command(version = "1.0.0")]
#[command(about = "Content migration for the ZEILER.me website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the site and write the record list and summary
    Crawl {
        /// Stop after this many pages have been recorded
        #[arg(long)]
        max_pages: Option<usize>,

        /// Start page, also the origin links must share
        #[arg(long)]
        base_url: Option<String>,

        /// Pause between requests in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Validate config and show the effective settings without crawling
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate the front-end data module from crawl output
    Integrate {
        /// Crawl output to read (overrides output.data-path)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Module to write (overrides integrator.module-path)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show statistics of persisted crawl output
    Stats {
        /// Crawl output to read (overrides output.data-path)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Crawl {
            max_pages,
            base_url,
            delay_ms,
            dry_run,
        } => {
            if let Some(max_pages) = max_pages {
                config.crawler.max_pages = max_pages;
            }
            if let Some(base_url) = base_url {
                config.crawler.base_url = base_url;
            }
            if let Some(delay_ms) = delay_ms {
                config.crawler.delay_ms = delay_ms;
            }
            validate(&config).context("Invalid command-line override")?;

            if dry_run {
                handle_dry_run(&config);
            } else {
                handle_crawl(&config).await?;
            }
        }
        Command::Integrate { input, output } => {
            if let Some(input) = input {
                config.output.data_path = input.display().to_string();
            }
            if let Some(output) = output {
                config.integrator.module_path = output.display().to_string();
            }
            handle_integrate(&config)?;
        }
        Command::Stats { input } => {
            let input = input.unwrap_or_else(|| PathBuf::from(&config.output.data_path));
            handle_stats(&input);
        }
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
            0 => EnvFilter::new("zeiler_migrate=info,warn"),
            1 => EnvFilter::new("zeiler_migrate=debug,info"),
            2 => EnvFilter::new("zeiler_migrate=trace,debug"),
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

/// Loads the config file if one was given, otherwise the built-in defaults
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles `crawl --dry-run`: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== zeiler-migrate Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay: {}ms", config.crawler.delay_ms);
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!(
        "  Min content length: {} characters",
        config.crawler.min_content_length
    );
    println!("  Site name: {}", config.crawler.site_name);

    println!(
        "\nContent Selectors ({}):",
        config.crawler.content_selectors.len()
    );
    for selector in &config.crawler.content_selectors {
        println!("  - {}", selector);
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Records: {}", config.output.data_path);
    println!("  Summary: {}", config.output.summary_path);
    println!("  Assets: {}", config.output.assets_dir);

    println!("\nIntegrator:");
    println!("  Module: {}", config.integrator.module_path);
    println!("  Excerpt length: {}", config.integrator.excerpt_length);
    println!("  Asset URL prefix: {}", config.integrator.asset_url_prefix);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl up to {} pages starting at {}",
        config.crawler.max_pages, config.crawler.base_url
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} (budget: {} pages)",
        config.crawler.base_url,
        config.crawler.max_pages
    );

    let outcome = run_crawl(config).await.context("Crawl failed")?;
    print_crawl_report(&outcome.report, &outcome.summary);

    println!("\n✓ Records written to: {}", config.output.data_path);
    println!("✓ Summary written to: {}", config.output.summary_path);

    Ok(())
}

/// Handles the integrate operation
fn handle_integrate(config: &Config) -> anyhow::Result<()> {
    let outcome = run_integrate(config).context("Integration failed")?;

    println!("\n{}", "=".repeat(50));
    println!("INTEGRATION COMPLETED");
    println!("{}", "=".repeat(50));
    if outcome.source == InputSource::Samples {
        println!("Input: built-in sample articles");
    } else {
        println!("Input: {}", config.output.data_path);
    }
    println!("Records read: {}", outcome.records_read);
    println!("Articles written: {}", outcome.stats.total);
    println!("Categories: {}", outcome.stats.categories.join(", "));
    println!("Authors: {}", outcome.stats.authors.join(", "));
    println!("Total words: {}", outcome.stats.total_words);
    println!(
        "Average reading time: {} min",
        outcome.stats.average_reading_time
    );
    println!("\n✓ Module written to: {}", outcome.module_path.display());

    Ok(())
}

/// Handles the stats operation: reads persisted records and prints statistics
///
/// Unreadable input is reported but does not fail the command.
fn handle_stats(input: &Path) {
    println!("Records: {}\n", input.display());

    match load_records(input) {
        Ok(records) => print_statistics(&records),
        Err(e) => {
            tracing::error!("Failed to read crawl output from {}: {}", input.display(), e);
            println!("✗ No statistics available");
        }
    }
}
