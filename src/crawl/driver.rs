// src/crawl/driver.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Start with the seed URLs as the input set
// 2. For every URL in the input set: fetch, extract, normalize, dedup,
//    and append the page's links to the frontier store
// 3. Once every page of the iteration is in the store, reload the store
//    and use it as the next iteration's input set
// 4. Stop after `depth` iterations (depth 0 = no fetching at all)
//
// Note that step 3 reloads EVERYTHING ever recorded, so iteration k > 1
// refetches pages from earlier iterations too. FrontierPolicy::Incremental
// swaps this for "only URLs not seen before".
//
// Within one iteration pages are fetched through a bounded pool, but results
// are consumed in input order, so logs and the store stay reproducible.
// =============================================================================

use super::fetch::PageFetcher;
use super::frontier::FrontierStore;
use super::report::{CrawlReport, IterationReport, PageFailure};
use crate::error::Result;
use crate::links::{dedup, harvest_page_links, PageContext};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{info, warn};

/// What feeds the next iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierPolicy {
    /// Everything in the store, repeats included
    #[default]
    Accumulate,
    /// Only URLs that were not known before this iteration
    Incremental,
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub depth: usize,
    /// Maximum number of fetches in flight within one iteration
    pub concurrency: usize,
    pub policy: FrontierPolicy,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            concurrency: 8,
            policy: FrontierPolicy::Accumulate,
        }
    }
}

// Runs the whole crawl
//
// Parameters:
//   fetcher: where page bodies come from
//   store: where discovered links go (and are reloaded from)
//   seeds: the input set for iteration 1
//   options: depth, pool size and frontier policy
//
// Returns: a report of every iteration, or the first fatal (store) error.
//          Per-page failures are recorded in the report, never returned.
pub async fn harvest(
    fetcher: &dyn PageFetcher,
    store: &dyn FrontierStore,
    seeds: Vec<String>,
    options: &CrawlOptions,
) -> Result<CrawlReport> {
    let mut report = CrawlReport {
        depth: options.depth,
        iterations: Vec::with_capacity(options.depth),
    };

    if options.depth == 0 {
        info!("depth is 0, nothing to crawl");
        return Ok(report);
    }

    let mut seen: HashSet<String> = HashSet::new();
    if options.policy == FrontierPolicy::Incremental {
        seen.extend(store.load_all().await?);
        // Canonical form, so "https://a.test" and "https://a.test/" match
        seen.extend(seeds.iter().map(|seed| match PageContext::parse(seed) {
            Ok(page) => page.as_str().to_string(),
            Err(_) => seed.clone(),
        }));
    }

    let mut input = seeds;

    for iteration in 1..=options.depth {
        info!(iteration, pages = input.len(), "starting iteration");

        let (iteration_report, recorded) =
            run_iteration(fetcher, store, &input, iteration, options.concurrency).await?;

        info!(
            iteration,
            succeeded = iteration_report.pages_succeeded,
            failed = iteration_report.failures.len(),
            links = iteration_report.links_recorded,
            "finished iteration"
        );
        report.iterations.push(iteration_report);

        if iteration == options.depth {
            break;
        }

        input = match options.policy {
            FrontierPolicy::Accumulate => store.load_all().await?,
            FrontierPolicy::Incremental => dedup(recorded)
                .into_iter()
                .filter(|url| seen.insert(url.clone()))
                .collect(),
        };
    }

    Ok(report)
}

// One pass over the input set
//
// Returns the iteration's report plus every link appended during it.
// All appends have completed by the time this returns.
async fn run_iteration(
    fetcher: &dyn PageFetcher,
    store: &dyn FrontierStore,
    input: &[String],
    iteration: usize,
    concurrency: usize,
) -> Result<(IterationReport, Vec<String>)> {
    let mut report = IterationReport {
        iteration,
        pages_attempted: input.len(),
        ..Default::default()
    };
    let mut recorded = Vec::new();

    let pages = stream::iter(input.iter().map(|raw| async move {
        let outcome = process_page(fetcher, raw).await;
        (raw, outcome)
    }))
    .buffered(concurrency.max(1));
    let mut pages = std::pin::pin!(pages);

    while let Some((raw, outcome)) = pages.next().await {
        match outcome {
            Ok(links) => {
                store.append_iteration(&links, iteration).await?;
                info!(iteration, url = %raw, links = links.len(), "links saved");

                report.pages_succeeded += 1;
                report.links_recorded += links.len();
                recorded.extend(links);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(iteration, url = %raw, error = %e, "skipping page");
                report.failures.push(PageFailure::new(raw, &e));
            }
        }
    }

    Ok((report, recorded))
}

// Fetches one page and returns its unique, sorted, canonical links
async fn process_page(fetcher: &dyn PageFetcher, raw: &str) -> Result<Vec<String>> {
    let page = PageContext::parse(raw)?;
    let body = fetcher.fetch(page.url()).await?;
    harvest_page_links(&page, &body)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered() vs buffer_unordered()
//    - Both run up to N futures at once
//    - buffered(N) hands results back in the order the futures were created
//    - We want that here: the store and the logs follow the input order
//
// 2. Why std::pin::pin!?
//    - StreamExt::next() needs a stream that won't move in memory
//    - pin! pins it on the stack without a heap allocation
//
// 3. Why &dyn PageFetcher instead of a generic?
//    - The real crawler and the tests plug in different fetchers
//    - A trait object keeps harvest() a single, non-generic function
//
// 4. Where is the iteration barrier?
//    - run_iteration() only returns after the stream is drained,
//      so every append is done before load_all() runs
// -----------------------------------------------------------------------------
