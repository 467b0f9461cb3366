//! Export of the drained aggregation store
//!
//! Two tabular artifacts (events per matchup, fighters flattened) plus an
//! optional hierarchical JSON artifact. Export runs strictly after the
//! crawl has drained; a write failure is fatal because the aggregation
//! exists only in memory and must not be silently lost.
//!
//! # Components
//!
//! - `csv`: the two CSV artifacts
//! - `json`: the hierarchical artifact

mod csv;
mod json;

pub use self::csv::{flatten_fighter, write_events_csv, write_fighters_csv};
pub use self::json::write_json;

use crate::config::OutputConfig;
use crate::store::AggregationStore;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting exports
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Writes every configured artifact from a drained store
pub fn write_exports(
    store: &AggregationStore,
    output: &OutputConfig,
    started_at: DateTime<Utc>,
) -> ExportResult<()> {
    let events = store.events_sorted();
    let fighters = store.fighters_sorted();

    let events_path = artifact_path(&output.events_path, output.timestamped, started_at);
    write_events_csv(&events, &events_path)?;
    tracing::info!("Event export written: {}", events_path.display());

    let fighters_path = artifact_path(&output.fighters_path, output.timestamped, started_at);
    write_fighters_csv(&fighters, &fighters_path)?;
    tracing::info!("Fighter export written: {}", fighters_path.display());

    if let Some(json_path) = &output.json_path {
        let json_path = artifact_path(json_path, output.timestamped, started_at);
        write_json(&events, &fighters, &json_path)?;
        tracing::info!("JSON export written: {}", json_path.display());
    }

    Ok(())
}

/// Resolves an artifact path, stamping the crawl start time when configured
fn artifact_path(path: &str, timestamped: bool, started_at: DateTime<Utc>) -> PathBuf {
    if !timestamped {
        return PathBuf::from(path);
    }

    let stamp = started_at.format("%Y-%m-%d_%H-%M-%S");
    let path = Path::new(path);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext),
        None => format!("{}_{}", stem, stamp),
    };
    path.with_file_name(name)
}
