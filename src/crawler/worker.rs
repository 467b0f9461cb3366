//! The worker pool draining the frontier
//!
//! Every worker runs the same loop: take a URL, fetch it, classify the
//! document, run the applicable extractors, push entities into the store,
//! and offer discovered links back to the frontier. Worker count changes
//! throughput, never result content.

use crate::config::Config;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::extract::{classify, extract_page, PageKind, Rules};
use crate::model::{Event, FighterUpdate};
use crate::store::AggregationStore;
use crate::url::{normalize_url, AdmissionPolicy};
use reqwest::Client;
use scraper::Html;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared state every worker operates on
pub(crate) struct CrawlContext {
    pub config: Arc<Config>,
    pub rules: Rules,
    pub policy: AdmissionPolicy,
    pub frontier: Frontier,
    pub store: Arc<AggregationStore>,
    pub client: Client,
    pub pages_fetched: AtomicU64,
    pub fetch_errors: AtomicU64,
}

/// One worker's loop; exits when the frontier reports drained or closed
pub(crate) async fn run_worker(id: u32, ctx: Arc<CrawlContext>) {
    while let Some(entry) = ctx.frontier.take().await {
        process_entry(&ctx, &entry).await;
        ctx.frontier.task_done();
    }
    tracing::debug!(worker = id, "Worker exiting");
}

/// Processes one frontier entry end to end
///
/// Fetch failures are logged and counted; the URL is simply not extracted.
async fn process_entry(ctx: &CrawlContext, entry: &FrontierEntry) {
    tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

    let body = match fetch_page(&ctx.client, &entry.url).await {
        Ok(body) => {
            let fetched = ctx.pages_fetched.fetch_add(1, Ordering::Relaxed) + 1;
            if fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier",
                    fetched,
                    ctx.frontier.pending()
                );
            }
            body
        }
        Err(e) => {
            ctx.fetch_errors.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Skipping URL after fetch failure: {}", e);
            return;
        }
    };

    // the parsed document is confined to this block; extraction is fully
    // synchronous, so nothing non-Send lives across an await point
    let (events, fighter, links) = {
        let document = Html::parse_document(&body);
        let kinds = classify(entry.url.as_str(), &document, &ctx.rules);

        if kinds != [PageKind::Unknown] {
            tracing::debug!(
                "Classified {} as [{}]",
                entry.url,
                kinds
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let extraction = extract_page(&kinds, &entry.url, &document, &ctx.rules);
        (extraction.events, extraction.fighter, extraction.links)
    };

    submit(ctx, events, fighter);

    let mut offered = 0;
    for link in &links {
        let normalized = match normalize_url(link) {
            Ok(u) => u,
            Err(_) => continue,
        };
        if !ctx.policy.admits(&normalized) {
            continue;
        }
        if ctx.frontier.offer(normalized.as_str(), entry.depth + 1) {
            offered += 1;
        }
    }

    tracing::debug!(
        "Processed {}: {} links found, {} newly queued",
        entry.url,
        links.len(),
        offered
    );
}

/// Pushes one page's entity fragments into the aggregation store
fn submit(ctx: &CrawlContext, events: Vec<Event>, fighter: Option<FighterUpdate>) {
    for event in events {
        tracing::debug!(
            "Event observation: {} ({} matchups)",
            event.name,
            event.matchups.len()
        );
        ctx.store.upsert_event(event);
    }

    if let Some(update) = fighter {
        tracing::debug!("Fighter observation: {}", update.name);
        ctx.store.upsert_fighter(update);
    }
}

/// Spawns the configured number of workers and waits for all of them
pub(crate) async fn run_pool(ctx: Arc<CrawlContext>) -> crate::Result<()> {
    let workers = ctx.config.crawler.workers;
    tracing::info!("Starting {} workers", workers);

    let mut handles = Vec::with_capacity(workers as usize);
    for id in 0..workers {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(run_worker(id, ctx)));
    }

    for handle in handles {
        handle.await?;
    }

    Ok(())
}
