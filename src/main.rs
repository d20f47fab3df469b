// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the report and exit (0 = crawl completed, 2 = aborted)
//
// Per-page failures (dead links, non-HTML pages, ...) never change the exit
// code. Only a bad seed list / depth value or a frontier file that cannot
// be written aborts the run.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod links;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs, FrontierArgs};
use crawl::{
    CrawlOptions, CrawlReport, FileFrontier, FrontierPolicy, FrontierStore, FrontierSummary,
    HttpFetcher,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
        Commands::Frontier(args) => handle_frontier(args).await,
    }
}

// Logs go to stderr so `--json` output on stdout stays machine-readable
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    // Both inputs are read before anything touches the network
    let seeds = config::load_seeds(&args.seeds)?;
    let depth = match args.depth {
        Some(depth) => depth,
        None => config::load_depth(&args.depth_file)?,
    };

    let store = FileFrontier::new(&args.output);
    if args.fresh {
        store.clear().await?;
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout))?;

    let options = CrawlOptions {
        depth,
        concurrency: usize::from(args.concurrency),
        policy: if args.incremental {
            FrontierPolicy::Incremental
        } else {
            FrontierPolicy::Accumulate
        },
    };

    tracing::info!(
        seeds = seeds.len(),
        depth,
        frontier = %store.path().display(),
        "starting crawl"
    );

    let report = crawl::harvest(&fetcher, &store, seeds, &options)
        .await
        .context("crawl aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_crawl_table(&report, &store);
    }

    Ok(0)
}

// Handles the 'frontier' subcommand
async fn handle_frontier(args: FrontierArgs) -> Result<i32> {
    let store = FileFrontier::new(&args.output);
    let entries = store
        .load_entries()
        .await
        .with_context(|| format!("cannot read {}", args.output.display()))?;
    let summary = crawl::summarize(&entries);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_frontier_table(&summary);
    }

    Ok(0)
}

fn print_crawl_table(report: &CrawlReport, store: &FileFrontier) {
    println!("{:<10} {:<10} {:<10} {:<10} {:<10}", "ITERATION", "PAGES", "OK", "FAILED", "LINKS");
    println!("{}", "=".repeat(54));

    for it in &report.iterations {
        println!(
            "{:<10} {:<10} {:<10} {:<10} {:<10}",
            it.iteration,
            it.pages_attempted,
            it.pages_succeeded,
            it.failures.len(),
            it.links_recorded
        );
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!();
        println!("Skipped pages:");
        for failure in &failures {
            println!("   {} [{}] {}", failure.url, failure.kind, failure.message);
        }
    }

    println!();
    println!("Summary:");
    println!("   Depth: {}", report.depth);
    println!("   Pages fetched: {}", report.pages_fetched());
    println!("   Pages skipped: {}", failures.len());
    println!("   Links recorded: {}", report.links_recorded());
    println!("   Frontier: {}", store.path().display());
}

fn print_frontier_table(summary: &FrontierSummary) {
    println!("{:<80} {:<10}", "URL", "FIRST SEEN");
    println!("{}", "=".repeat(91));

    for entry in &summary.urls {
        let first_seen = entry
            .first_iteration
            .map(|n| format!("iter {}", n))
            .unwrap_or_else(|| "-".to_string());

        // Truncate URL if too long for display
        let url_display = if entry.url.chars().count() > 77 {
            format!("{}...", entry.url.chars().take(77).collect::<String>())
        } else {
            entry.url.clone()
        };

        println!("{:<80} {:<10}", url_display, first_seen);
    }

    println!();
    println!("Summary:");
    println!("   Distinct URLs: {}", summary.distinct_urls);
    println!("   Raw entries: {}", summary.raw_entries);
}
