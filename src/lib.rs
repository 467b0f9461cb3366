//! Cagecrawl: a concurrent MMA fight-card harvester
//!
//! This crate crawls a set of cross-linked fight-center and fighter pages,
//! classifies each page by kind, extracts typed records through
//! configuration-supplied layout rules, and consolidates partial
//! observations of the same event or fighter into one record per entity.

pub mod config;
pub mod crawler;
pub mod export;
pub mod extract;
pub mod model;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for cagecrawl operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Unknown bio field key: {0}")]
    UnknownBioField(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for cagecrawl operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::PageKind;
pub use model::{Event, Fighter, FighterBio, FightHistoryEntry, FightStats, Matchup};
pub use store::AggregationStore;
pub use url::{normalize_url, AdmissionPolicy};
