//! The URL frontier: seen-set dedup plus the pending-work queue
//!
//! The frontier is the single authority on which URLs have been handed out.
//! `offer` is atomic under one mutex, so concurrent offers of the same URL
//! produce exactly one acceptance; `take` blocks until work exists or the
//! crawl is provably finished.
//!
//! Termination needs more than "queue empty": a worker still processing a
//! page may be about to offer more URLs. The frontier tracks an in-flight
//! count (taking increments it, `task_done` decrements it), and only when
//! the queue is empty with zero in-flight does it close and wake every
//! blocked taker.

use crate::url::normalize_url;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

/// A URL handed out by the frontier, with its discovery depth
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

#[derive(Debug, Default)]
struct Inner {
    seen: HashSet<String>,
    queue: VecDeque<FrontierEntry>,
    in_flight: usize,
    closed: bool,
}

/// Thread-safe frontier shared by every worker
#[derive(Debug)]
pub struct Frontier {
    inner: Mutex<Inner>,
    notify: Notify,
    max_depth: u32,
}

impl Frontier {
    pub fn new(max_depth: u32) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            notify: Notify::new(),
            max_depth,
        }
    }

    /// Offers a URL at the given depth; returns whether it was enqueued
    ///
    /// The URL is normalized before the seen-check so spelling variants
    /// dedup to one fetch. Entries beyond the depth limit are silently
    /// dropped without marking the URL seen, so a shallower rediscovery
    /// can still queue it.
    pub fn offer(&self, url: &str, depth: u32) -> bool {
        if depth > self.max_depth {
            tracing::trace!("Depth {} exceeds limit, dropping {}", depth, url);
            return false;
        }

        let normalized = match normalize_url(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Cannot normalize {}: {}", url, e);
                return false;
            }
        };

        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return false;
        }
        if !inner.seen.insert(normalized.to_string()) {
            return false;
        }
        inner.queue.push_back(FrontierEntry {
            url: normalized,
            depth,
        });
        drop(inner);

        self.notify.notify_one();
        true
    }

    /// Takes the next URL, waiting until one exists or the crawl is done
    ///
    /// Returns None once the frontier is closed or drained (empty queue and
    /// nothing in flight). Every successful take must be paired with a
    /// `task_done` call after the URL's processing has finished offering
    /// its discoveries.
    pub async fn take(&self) -> Option<FrontierEntry> {
        loop {
            let notified = self.notify.notified();
            {
                let mut inner = self.inner.lock().unwrap();
                if inner.closed {
                    drop(inner);
                    // cascade so sibling takers observe the end too
                    self.notify.notify_one();
                    return None;
                }
                if let Some(entry) = inner.queue.pop_front() {
                    inner.in_flight += 1;
                    return Some(entry);
                }
                if inner.in_flight == 0 {
                    inner.closed = true;
                    drop(inner);
                    self.notify.notify_one();
                    return None;
                }
            }
            notified.await;
        }
    }

    /// Marks one taken URL as fully processed
    ///
    /// The last `task_done` on an empty queue closes the frontier.
    pub fn task_done(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if inner.in_flight == 0 && inner.queue.is_empty() {
            inner.closed = true;
        }
        drop(inner);
        self.notify.notify_one();
    }

    /// Closes the frontier immediately, abandoning queued work
    ///
    /// Used by the wall-clock budget: blocked takers return None and
    /// workers wind down after their current page.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        drop(inner);
        self.notify.notify_one();
    }

    /// Number of URLs accepted over the crawl's lifetime
    pub fn seen_count(&self) -> usize {
        self.inner.lock().unwrap().seen.len()
    }

    /// Number of URLs waiting to be taken
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }
}
