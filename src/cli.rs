// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two subcommands:
// - crawl:    run the harvester over a seed list
// - frontier: show what a previous run has stored
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version,
    about = "Harvest links breadth-first from a list of seed URLs",
    long_about = "link-harvester fetches every seed page, collects the absolute links on it, \
                  and feeds everything it has found back in as the next crawl level, \
                  up to a fixed depth. Discovered links are appended to a frontier file."
)]
pub struct Cli {
    /// Log debug output (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl from the seed list and append discovered links to the frontier
    ///
    /// Example: link-harvester crawl --seeds seeds.txt --depth 2
    Crawl(CrawlArgs),

    /// Show the URLs stored in a frontier file
    ///
    /// Example: link-harvester frontier --output frontier.txt
    Frontier(FrontierArgs),
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Newline-delimited list of seed URLs
    #[arg(long, default_value = "seeds.txt")]
    pub seeds: PathBuf,

    /// Crawl depth (number of fetch rounds); overrides --depth-file
    #[arg(long)]
    pub depth: Option<usize>,

    /// File holding the crawl depth as a single integer
    #[arg(long, default_value = "depth.txt")]
    pub depth_file: PathBuf,

    /// Frontier file that discovered links are appended to
    #[arg(long, default_value = "frontier.txt")]
    pub output: PathBuf,

    /// Empty the frontier file before crawling instead of continuing it
    #[arg(long)]
    pub fresh: bool,

    /// Maximum number of pages fetched at once within one crawl level
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Feed only newly discovered URLs into the next level
    /// instead of everything in the frontier
    #[arg(long)]
    pub incremental: bool,

    /// Output the run report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FrontierArgs {
    /// Frontier file to read
    #[arg(long, default_value = "frontier.txt")]
    pub output: PathBuf,

    /// Output in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}
