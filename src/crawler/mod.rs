//! Crawl orchestration
//!
//! This module wires the pipeline together:
//! - seed the frontier
//! - spawn the worker pool
//! - wait for the drained-and-idle termination signal
//! - hand the frozen aggregation store back for export
//!
//! # Components
//!
//! - `frontier`: seen-set dedup and the pending queue
//! - `fetcher`: HTTP adapter turning a URL into a body or a typed error
//! - `worker`: the fixed pool draining the frontier

mod fetcher;
mod frontier;
mod worker;

pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use frontier::{Frontier, FrontierEntry};

use crate::config::Config;
use crate::extract::Rules;
use crate::store::AggregationStore;
use crate::url::AdmissionPolicy;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use worker::CrawlContext;

/// Summary of one finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub urls_seen: usize,
    pub pages_fetched: u64,
    pub fetch_errors: u64,
    pub events: usize,
    pub fighters: usize,
}

impl CrawlReport {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Runs a complete crawl and returns the drained store plus a report
///
/// The store comes back only after every worker has exited, so the caller
/// always reads a frozen snapshot; there is no export-while-crawling.
pub async fn crawl(config: Config) -> crate::Result<(Arc<AggregationStore>, CrawlReport)> {
    let rules = Rules::compile(&config)?;
    let policy = AdmissionPolicy::from_config(&config.admission);
    let client = build_http_client(&config.crawler)?;

    let frontier = Frontier::new(config.crawler.max_depth);
    let mut seeded = 0;
    for seed in &config.seeds {
        if frontier.offer(seed, 0) {
            seeded += 1;
        } else {
            tracing::warn!("Seed not queued (duplicate or malformed): {}", seed);
        }
    }
    tracing::info!("Seeded frontier with {} URLs", seeded);

    let ctx = Arc::new(CrawlContext {
        config: Arc::new(config),
        rules,
        policy,
        frontier,
        store: Arc::new(AggregationStore::new()),
        client,
        pages_fetched: AtomicU64::new(0),
        fetch_errors: AtomicU64::new(0),
    });

    let started_at = Utc::now();

    // optional wall-clock budget: close the frontier when it elapses and
    // export whatever has aggregated by then
    let watchdog = ctx.config.crawler.max_runtime_secs.map(|secs| {
        let ctx = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            tracing::warn!("Wall-clock budget of {}s elapsed, closing frontier", secs);
            ctx.frontier.close();
        })
    });

    let pool_result = worker::run_pool(ctx.clone()).await;
    if let Some(handle) = watchdog {
        handle.abort();
    }
    pool_result?;

    let finished_at = Utc::now();
    let store = ctx.store.clone();

    let report = CrawlReport {
        started_at,
        finished_at,
        urls_seen: ctx.frontier.seen_count(),
        pages_fetched: ctx.pages_fetched.load(Ordering::Relaxed),
        fetch_errors: ctx.fetch_errors.load(Ordering::Relaxed),
        events: store.event_count(),
        fighters: store.fighter_count(),
    };

    tracing::info!(
        "Crawl complete: {} pages fetched, {} fetch errors, {} events, {} fighters in {}s",
        report.pages_fetched,
        report.fetch_errors,
        report.events,
        report.fighters,
        report.duration_seconds()
    );

    Ok((store, report))
}
