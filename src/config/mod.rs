//! Configuration module for cagecrawl
//!
//! Handles loading, parsing, and validating TOML configuration files. The
//! admission patterns, page-classification rules, and extraction selectors
//! all live here as data; the crawl engine never hardcodes a layout detail.
//!
//! # Example
//!
//! ```no_run
//! use cagecrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling with {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AdmissionConfig, ClassifierConfig, Config, CrawlerConfig, EventSelectors, ExtractConfig,
    FighterSelectors, MarkerRule, OutputConfig, UrlRule, WinnerSide,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
